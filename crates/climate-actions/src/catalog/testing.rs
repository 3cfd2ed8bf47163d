use super::domain::{ActionRecord, ActionStatus, Category, CostTier, Sector};

pub(crate) fn action(id: &str, city: &str, status: ActionStatus) -> ActionRecord {
    ActionRecord {
        id: id.to_string(),
        city: city.to_string(),
        country: "Brazil".to_string(),
        action_name: format!("Action {id}"),
        category: Category::Mitigation,
        sector: Sector::Waste,
        cost_tier: CostTier::Medium,
        investment_usd: None,
        status,
        reduction_potential_pct: None,
        implementation_time_years: None,
        description: format!("Description for action {id}"),
        owner: None,
        last_updated: "2025-01-01".to_string(),
        status_history: None,
        tags: None,
    }
}

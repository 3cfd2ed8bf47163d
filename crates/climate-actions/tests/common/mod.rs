#![allow(dead_code)]

use climate_actions::catalog::{
    ActionRecord, ActionStatus, Category, CostTier, FilterCriteria, Sector,
};
use proptest::prelude::*;
use serde_json::{json, Value};

pub const CITIES: [&str; 6] = [
    "Serra",
    "Recife",
    "Corumbá",
    "Caxias do Sul",
    "Rio de Janeiro",
    "São Paulo",
];

pub fn record(
    id: &str,
    city: &str,
    category: Category,
    sector: Sector,
    status: ActionStatus,
) -> ActionRecord {
    ActionRecord {
        id: id.to_string(),
        city: city.to_string(),
        country: "Brazil".to_string(),
        action_name: format!("Action {id}"),
        category,
        sector,
        cost_tier: CostTier::Medium,
        investment_usd: None,
        status,
        reduction_potential_pct: None,
        implementation_time_years: None,
        description: String::new(),
        owner: None,
        last_updated: "2025-01-01".to_string(),
        status_history: None,
        tags: None,
    }
}

/// The two-record catalog used across scenario tests.
pub fn serra_recife() -> Value {
    json!([
        {
            "id": "1",
            "city": "Serra",
            "country": "Brazil",
            "actionName": "Landfill gas capture",
            "category": "Mitigation",
            "sector": "Waste",
            "costTier": "High",
            "status": "Completed",
            "description": "Capture and flare landfill methane",
            "lastUpdated": "2025-03-01"
        },
        {
            "id": "2",
            "city": "Recife",
            "country": "Brazil",
            "actionName": "Mangrove restoration",
            "category": "Adaptation",
            "sector": "AFOLU",
            "costTier": "Low",
            "status": "In progress",
            "description": "Restore coastal mangroves",
            "lastUpdated": "2025-04-15",
            "tags": ["coastal", "nature-based"]
        }
    ])
}

pub fn ids(records: &[ActionRecord]) -> Vec<&str> {
    records.iter().map(|record| record.id.as_str()).collect()
}

fn one_of<T: Copy + std::fmt::Debug + 'static, const N: usize>(
    values: [T; N],
) -> impl Strategy<Value = T> {
    (0..N).prop_map(move |index| values[index])
}

pub fn category() -> impl Strategy<Value = Category> {
    one_of(Category::ordered())
}

pub fn sector() -> impl Strategy<Value = Sector> {
    one_of(Sector::ordered())
}

pub fn cost_tier() -> impl Strategy<Value = CostTier> {
    one_of(CostTier::ordered())
}

pub fn status() -> impl Strategy<Value = ActionStatus> {
    one_of(ActionStatus::ordered())
}

pub fn action_record() -> impl Strategy<Value = ActionRecord> {
    (
        0u32..50,
        one_of(CITIES),
        category(),
        sector(),
        cost_tier(),
        status(),
        "[a-z ]{0,16}",
        prop::option::of(prop::collection::vec("[a-z]{1,6}", 0..3)),
    )
        .prop_map(
            |(id, city, category, sector, cost_tier, status, description, tags)| ActionRecord {
                cost_tier,
                description,
                tags,
                ..record(&id.to_string(), city, category, sector, status)
            },
        )
}

pub fn catalog() -> impl Strategy<Value = Vec<ActionRecord>> {
    prop::collection::vec(action_record(), 0..24)
}

pub fn criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::option::of(one_of(CITIES).prop_map(str::to_string)),
        prop::collection::vec(category(), 0..2),
        prop::collection::vec(sector(), 0..3),
        prop::collection::vec(cost_tier(), 0..2),
        prop::collection::vec(status(), 0..3),
        prop::option::of("[a-z]{1,4}"),
    )
        .prop_map(
            |(city, categories, sectors, cost_tiers, statuses, search)| FilterCriteria {
                city,
                categories,
                sectors,
                cost_tiers,
                statuses,
                search,
            },
        )
}

use super::domain::{ActionRecord, ActionStatus, Category, Sector};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Headline counts for the currently filtered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_cities: usize,
    pub total_actions: usize,
    pub mitigation_actions: usize,
    pub adaptation_actions: usize,
    pub sector_counts: BTreeMap<Sector, usize>,
    pub status_counts: BTreeMap<ActionStatus, usize>,
}

impl KpiSummary {
    pub fn sector_count(&self, sector: Sector) -> usize {
        self.sector_counts.get(&sector).copied().unwrap_or_default()
    }

    pub fn status_count(&self, status: ActionStatus) -> usize {
        self.status_counts.get(&status).copied().unwrap_or_default()
    }

    pub fn mitigation_share(&self) -> u32 {
        share_pct(self.mitigation_actions, self.total_actions)
    }

    pub fn adaptation_share(&self) -> u32 {
        share_pct(self.adaptation_actions, self.total_actions)
    }
}

pub fn aggregate(records: &[ActionRecord]) -> KpiSummary {
    let mut sector_counts: BTreeMap<Sector, usize> =
        Sector::ordered().into_iter().map(|sector| (sector, 0)).collect();
    let mut status_counts: BTreeMap<ActionStatus, usize> = ActionStatus::ordered()
        .into_iter()
        .map(|status| (status, 0))
        .collect();
    let mut cities = HashSet::new();
    let mut mitigation_actions = 0;
    let mut adaptation_actions = 0;

    for record in records {
        cities.insert(record.city.as_str());
        match record.category {
            Category::Mitigation => mitigation_actions += 1,
            Category::Adaptation => adaptation_actions += 1,
        }
        *sector_counts.entry(record.sector).or_default() += 1;
        *status_counts.entry(record.status).or_default() += 1;
    }

    KpiSummary {
        total_cities: cities.len(),
        total_actions: records.len(),
        mitigation_actions,
        adaptation_actions,
        sector_counts,
        status_counts,
    }
}

/// Whole-number percentage of `part` in `total`; an empty total is 0%.
pub fn share_pct(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::action;

    #[test]
    fn empty_input_reports_zeroes_for_every_key() {
        let summary = aggregate(&[]);
        assert_eq!(summary.total_actions, 0);
        assert_eq!(summary.total_cities, 0);
        assert_eq!(summary.sector_counts.len(), Sector::ordered().len());
        assert_eq!(summary.status_counts.len(), ActionStatus::ordered().len());
        assert!(summary.sector_counts.values().all(|count| *count == 0));
        assert!(summary.status_counts.values().all(|count| *count == 0));
        assert_eq!(summary.mitigation_share(), 0);
        assert_eq!(summary.adaptation_share(), 0);
    }

    #[test]
    fn counts_distinct_cities_case_sensitively() {
        let records = vec![
            action("1", "Serra", ActionStatus::Completed),
            action("2", "Serra", ActionStatus::InProgress),
            action("3", "serra", ActionStatus::InProgress),
        ];
        let summary = aggregate(&records);
        assert_eq!(summary.total_cities, 2);
        assert_eq!(summary.total_actions, 3);
        assert_eq!(summary.status_count(ActionStatus::InProgress), 2);
        assert_eq!(summary.status_count(ActionStatus::OnHold), 0);
    }

    #[test]
    fn category_counts_sum_to_total() {
        let mut adaptation = action("2", "Recife", ActionStatus::NotStarted);
        adaptation.category = Category::Adaptation;
        let records = vec![
            action("1", "Serra", ActionStatus::Completed),
            adaptation,
            action("3", "Recife", ActionStatus::Completed),
        ];
        let summary = aggregate(&records);
        assert_eq!(summary.mitigation_actions, 2);
        assert_eq!(summary.adaptation_actions, 1);
        assert_eq!(
            summary.mitigation_actions + summary.adaptation_actions,
            summary.total_actions
        );
        assert_eq!(summary.mitigation_share(), 67);
        assert_eq!(summary.adaptation_share(), 33);
    }

    #[test]
    fn serializes_with_wire_labels() {
        let value = serde_json::to_value(aggregate(&[])).expect("serialize");
        assert_eq!(value["totalActions"], 0);
        assert_eq!(value["sectorCounts"]["Stationary Energy"], 0);
        assert_eq!(value["statusCounts"]["Ready to start"], 0);
    }

    #[test]
    fn share_rounds_half_up() {
        assert_eq!(share_pct(1, 8), 13);
        assert_eq!(share_pct(1, 3), 33);
        assert_eq!(share_pct(5, 5), 100);
        assert_eq!(share_pct(0, 0), 0);
    }
}

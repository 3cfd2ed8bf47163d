use super::domain::{ActionRecord, ActionStatus, Category, CostTier, Sector};
use super::sort::locale_cmp;
use serde::{Deserialize, Serialize};

/// Facet selection driven by the dashboard user.
///
/// Empty facet lists impose no restriction. Values inside one facet are
/// alternatives; facets combine with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sectors: Vec<Sector>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cost_tiers: Vec<CostTier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<ActionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Partial change merged over the current criteria. `None` leaves a facet
/// untouched; `Some(None)` clears the city or search.
#[derive(Debug, Clone, Default)]
pub struct CriteriaUpdate {
    pub city: Option<Option<String>>,
    pub categories: Option<Vec<Category>>,
    pub sectors: Option<Vec<Sector>>,
    pub cost_tiers: Option<Vec<CostTier>>,
    pub statuses: Option<Vec<ActionStatus>>,
    pub search: Option<Option<String>>,
}

impl FilterCriteria {
    pub fn is_unrestricted(&self) -> bool {
        self.city.is_none()
            && self.categories.is_empty()
            && self.sectors.is_empty()
            && self.cost_tiers.is_empty()
            && self.statuses.is_empty()
            && self.search.as_deref().map_or(true, |search| search.trim().is_empty())
    }

    pub fn apply(&mut self, update: CriteriaUpdate) {
        if let Some(city) = update.city {
            self.city = city;
        }
        if let Some(categories) = update.categories {
            self.categories = categories;
        }
        if let Some(sectors) = update.sectors {
            self.sectors = sectors;
        }
        if let Some(cost_tiers) = update.cost_tiers {
            self.cost_tiers = cost_tiers;
        }
        if let Some(statuses) = update.statuses {
            self.statuses = statuses;
        }
        if let Some(search) = update.search {
            self.search = search;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Explicit query text wins; otherwise fall back to the search carried in
    /// the criteria (as decoded from a shared link).
    pub fn effective_search<'a>(&'a self, search: &'a str) -> &'a str {
        if search.trim().is_empty() {
            self.search.as_deref().unwrap_or_default()
        } else {
            search
        }
    }

    pub fn matches(&self, record: &ActionRecord, search: &str) -> bool {
        self.passes(record, normalized_query(search).as_deref())
    }

    /// `query` is already trimmed and lowercased.
    fn passes(&self, record: &ActionRecord, query: Option<&str>) -> bool {
        self.matches_facets(record)
            && query.map_or(true, |query| search_text(record).contains(query))
    }

    fn matches_facets(&self, record: &ActionRecord) -> bool {
        if let Some(city) = &self.city {
            if &record.city != city {
                return false;
            }
        }

        facet_allows(&self.categories, &record.category)
            && facet_allows(&self.sectors, &record.sector)
            && facet_allows(&self.cost_tiers, &record.cost_tier)
            && facet_allows(&self.statuses, &record.status)
    }
}

fn facet_allows<T: PartialEq>(selected: &[T], value: &T) -> bool {
    selected.is_empty() || selected.contains(value)
}

fn normalized_query(search: &str) -> Option<String> {
    let trimmed = search.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn search_text(record: &ActionRecord) -> String {
    let mut parts = vec![
        record.city.as_str(),
        record.action_name.as_str(),
        record.description.as_str(),
    ];
    parts.extend(record.tags().iter().map(String::as_str));
    parts.join(" ").to_lowercase()
}

/// Records passing every active facet and the free-text query, in input order.
pub fn filter_actions(
    records: &[ActionRecord],
    criteria: &FilterCriteria,
    search: &str,
) -> Vec<ActionRecord> {
    let query = normalized_query(search);
    records
        .iter()
        .filter(|record| criteria.passes(record, query.as_deref()))
        .cloned()
        .collect()
}

/// De-duplicated city names for the city selector, in collation order.
pub fn distinct_cities(records: &[ActionRecord]) -> Vec<String> {
    let mut cities: Vec<String> = records.iter().map(|record| record.city.clone()).collect();
    cities.sort_by(|a, b| locale_cmp(a, b));
    cities.dedup();
    cities
}

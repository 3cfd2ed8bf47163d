//! Shareable filter state as query-string parameters.
//!
//! `city`, `category`, `sector`, `cost`, `status` and `search`; facet lists
//! are comma-joined wire labels. Absent or empty facets are omitted.

use super::filter::FilterCriteria;
use std::fmt::Display;
use std::str::FromStr;
use url::form_urlencoded;

const CITY: &str = "city";
const CATEGORY: &str = "category";
const SECTOR: &str = "sector";
const COST: &str = "cost";
const STATUS: &str = "status";
const SEARCH: &str = "search";

pub fn to_query_string(criteria: &FilterCriteria) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if let Some(city) = criteria.city.as_deref().filter(|city| !city.is_empty()) {
        serializer.append_pair(CITY, city);
    }
    append_facet(&mut serializer, CATEGORY, &criteria.categories);
    append_facet(&mut serializer, SECTOR, &criteria.sectors);
    append_facet(&mut serializer, COST, &criteria.cost_tiers);
    append_facet(&mut serializer, STATUS, &criteria.statuses);
    if let Some(search) = criteria
        .search
        .as_deref()
        .filter(|search| !search.trim().is_empty())
    {
        serializer.append_pair(SEARCH, search);
    }

    serializer.finish()
}

/// Unknown keys are ignored, as are labels outside a facet's closed set.
pub fn from_query_string(query: &str) -> FilterCriteria {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut criteria = FilterCriteria::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            CITY => criteria.city = Some(value.into_owned()),
            CATEGORY => criteria.categories = parse_facet(&value),
            SECTOR => criteria.sectors = parse_facet(&value),
            COST => criteria.cost_tiers = parse_facet(&value),
            STATUS => criteria.statuses = parse_facet(&value),
            SEARCH => criteria.search = Some(value.into_owned()),
            _ => {}
        }
    }

    criteria
}

fn append_facet<T: Display>(
    serializer: &mut form_urlencoded::Serializer<'_, String>,
    key: &str,
    values: &[T],
) {
    if values.is_empty() {
        return;
    }
    let joined = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    serializer.append_pair(key, &joined);
}

fn parse_facet<T: FromStr>(raw: &str) -> Vec<T> {
    raw.split(',')
        .filter_map(|label| label.parse().ok())
        .collect()
}

//! Validation at the data boundary.
//!
//! Upstream payloads are untrusted: the spreadsheet is edited by hand and the
//! static snapshot is regenerated from CSV. Every record is checked field by
//! field and the first violation rejects the whole payload.

use super::domain::{ActionRecord, StatusHistoryEntry};
use serde_json::{Map, Value};
use std::str::FromStr;

pub const REQUIRED_FIELDS: [&str; 10] = [
    "id",
    "city",
    "country",
    "actionName",
    "category",
    "sector",
    "costTier",
    "status",
    "description",
    "lastUpdated",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("payload is not valid JSON: {0}")]
    Json(String),
    #[error("payload must be a JSON array of action records")]
    NotAnArray,
    #[error("record {index} must be a JSON object")]
    NotAnObject { index: usize },
    #[error("record {index} is missing required field `{field}`")]
    MissingField { index: usize, field: String },
    #[error("record {index} field `{field}` must be a {expected}")]
    WrongType {
        index: usize,
        field: String,
        expected: &'static str,
    },
    #[error("record {index} field `{field}` has unsupported value `{value}`")]
    InvalidEnum {
        index: usize,
        field: String,
        value: String,
    },
}

pub fn validate_json(raw: &str) -> Result<Vec<ActionRecord>, ValidationError> {
    let payload: Value =
        serde_json::from_str(raw).map_err(|err| ValidationError::Json(err.to_string()))?;
    validate_actions(&payload)
}

pub fn validate_actions(payload: &Value) -> Result<Vec<ActionRecord>, ValidationError> {
    let items = payload.as_array().ok_or(ValidationError::NotAnArray)?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_record(index, item))
        .collect()
}

fn validate_record(index: usize, item: &Value) -> Result<ActionRecord, ValidationError> {
    let fields = item
        .as_object()
        .ok_or(ValidationError::NotAnObject { index })?;
    let record = RecordFields { index, fields };

    Ok(ActionRecord {
        id: record.required_str("id")?,
        city: record.required_str("city")?,
        country: record.required_str("country")?,
        action_name: record.required_str("actionName")?,
        category: record.required_enum("category")?,
        sector: record.required_enum("sector")?,
        cost_tier: record.required_enum("costTier")?,
        investment_usd: record.optional_number("investmentUSD")?,
        status: record.required_enum("status")?,
        reduction_potential_pct: record.optional_str("reductionPotentialPct")?,
        implementation_time_years: record.optional_str("implementationTimeYears")?,
        description: record.required_str("description")?,
        owner: record.optional_str("owner")?,
        last_updated: record.required_str("lastUpdated")?,
        status_history: record.status_history()?,
        tags: record.optional_str_list("tags")?,
    })
}

struct RecordFields<'a> {
    index: usize,
    fields: &'a Map<String, Value>,
}

impl RecordFields<'_> {
    fn required(&self, field: &str) -> Result<&Value, ValidationError> {
        self.fields
            .get(field)
            .ok_or_else(|| ValidationError::MissingField {
                index: self.index,
                field: field.to_string(),
            })
    }

    /// Optional fields treat an explicit `null` as absent.
    fn optional(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    fn wrong_type(&self, field: &str, expected: &'static str) -> ValidationError {
        ValidationError::WrongType {
            index: self.index,
            field: field.to_string(),
            expected,
        }
    }

    fn as_str<'v>(&self, field: &str, value: &'v Value) -> Result<&'v str, ValidationError> {
        value.as_str().ok_or_else(|| self.wrong_type(field, "string"))
    }

    fn as_enum<T: FromStr>(&self, field: &str, value: &Value) -> Result<T, ValidationError> {
        let raw = self.as_str(field, value)?;
        raw.parse().map_err(|_| ValidationError::InvalidEnum {
            index: self.index,
            field: field.to_string(),
            value: raw.to_string(),
        })
    }

    fn required_str(&self, field: &str) -> Result<String, ValidationError> {
        let value = self.required(field)?;
        self.as_str(field, value).map(str::to_string)
    }

    fn required_enum<T: FromStr>(&self, field: &str) -> Result<T, ValidationError> {
        let value = self.required(field)?;
        self.as_enum(field, value)
    }

    fn optional_str(&self, field: &str) -> Result<Option<String>, ValidationError> {
        self.optional(field)
            .map(|value| self.as_str(field, value).map(str::to_string))
            .transpose()
    }

    fn optional_number(&self, field: &str) -> Result<Option<f64>, ValidationError> {
        self.optional(field)
            .map(|value| value.as_f64().ok_or_else(|| self.wrong_type(field, "number")))
            .transpose()
    }

    fn optional_str_list(&self, field: &str) -> Result<Option<Vec<String>>, ValidationError> {
        let Some(value) = self.optional(field) else {
            return Ok(None);
        };
        let items = value
            .as_array()
            .ok_or_else(|| self.wrong_type(field, "array of strings"))?;

        items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                let path = format!("{field}[{position}]");
                self.as_str(&path, item).map(str::to_string)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn status_history(&self) -> Result<Option<Vec<StatusHistoryEntry>>, ValidationError> {
        const FIELD: &str = "status_history";
        let Some(value) = self.optional(FIELD) else {
            return Ok(None);
        };
        let entries = value
            .as_array()
            .ok_or_else(|| self.wrong_type(FIELD, "array"))?;

        entries
            .iter()
            .enumerate()
            .map(|(position, entry)| {
                let path = format!("{FIELD}[{position}]");
                let entry = entry
                    .as_object()
                    .ok_or_else(|| self.wrong_type(&path, "object"))?;
                let nested = RecordFields {
                    index: self.index,
                    fields: entry,
                };
                let date_path = format!("{path}.date");
                let status_path = format!("{path}.status");
                let date = entry
                    .get("date")
                    .ok_or_else(|| ValidationError::MissingField {
                        index: self.index,
                        field: date_path.clone(),
                    })?;
                let status = entry
                    .get("status")
                    .ok_or_else(|| ValidationError::MissingField {
                        index: self.index,
                        field: status_path.clone(),
                    })?;

                Ok(StatusHistoryEntry {
                    date: nested.as_str(&date_path, date)?.to_string(),
                    status: nested.as_enum(&status_path, status)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

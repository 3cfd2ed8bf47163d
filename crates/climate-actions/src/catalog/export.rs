//! Downloadable CSV / JSON payloads of the filtered collection.
//!
//! Column order of the CSV is relied on by spreadsheet imports downstream and
//! must not change.

use super::domain::{whole_amount, ActionRecord};
use chrono::{NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

pub const CSV_HEADERS: [&str; 15] = [
    "ID",
    "City",
    "Country",
    "Action Name",
    "Category",
    "Sector",
    "Cost Tier",
    "Investment USD",
    "Status",
    "Reduction Potential",
    "Implementation Time",
    "Description",
    "Owner",
    "Last Updated",
    "Tags",
];

const FILE_STEM: &str = "climate-actions";
const TAG_SEPARATOR: &str = "; ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn mime(self) -> mime::Mime {
        match self {
            Self::Csv => mime::TEXT_CSV_UTF_8,
            Self::Json => mime::APPLICATION_JSON,
        }
    }

    pub fn file_name(self, date: NaiveDate) -> String {
        format!("{FILE_STEM}-{}.{}", date.format("%Y-%m-%d"), self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(ExportError::UnknownFormat(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportPayload {
    pub file_name: String,
    pub content_type: mime::Mime,
    pub body: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported export format `{0}` (expected csv or json)")]
    UnknownFormat(String),
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to flush export buffer: {0}")]
    Io(#[from] std::io::Error),
}

pub fn export_actions(
    records: &[ActionRecord],
    format: ExportFormat,
    date: NaiveDate,
) -> Result<ExportPayload, ExportError> {
    let body = match format {
        ExportFormat::Csv => to_csv(records)?,
        ExportFormat::Json => serde_json::to_vec_pretty(records)?,
    };

    Ok(ExportPayload {
        file_name: format.file_name(date),
        content_type: format.mime(),
        body,
    })
}

/// Header row is written bare; every data field is quoted with embedded
/// quotes doubled.
pub fn to_csv(records: &[ActionRecord]) -> Result<Vec<u8>, ExportError> {
    let mut body = Vec::new();

    let mut header = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(&mut body);
    header.write_record(CSV_HEADERS)?;
    header.flush()?;
    drop(header);

    let mut rows = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(&mut body);
    for record in records {
        rows.write_record(csv_row(record))?;
    }
    rows.flush()?;
    drop(rows);

    Ok(body)
}

fn csv_row(record: &ActionRecord) -> [String; 15] {
    [
        record.id.clone(),
        record.city.clone(),
        record.country.clone(),
        record.action_name.clone(),
        record.category.label().to_string(),
        record.sector.label().to_string(),
        record.cost_tier.label().to_string(),
        record.investment_usd.map(format_amount).unwrap_or_default(),
        record.status.label().to_string(),
        record.reduction_potential_pct.clone().unwrap_or_default(),
        record.implementation_time_years.clone().unwrap_or_default(),
        record.description.clone(),
        record.owner.clone().unwrap_or_default(),
        record.last_updated.clone(),
        record.tags().join(TAG_SEPARATOR),
    ]
}

fn format_amount(amount: f64) -> String {
    whole_amount(amount).map_or_else(|| amount.to_string(), |whole| whole.to_string())
}

/// Calendar date stamped into export file names and status updates, in UTC.
pub fn export_date() -> NaiveDate {
    Utc::now().date_naive()
}

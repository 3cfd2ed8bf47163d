use super::mapping::{header_fields, row_to_record};
use super::{ActionSource, SourceError};
use crate::config::SheetsConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const SOURCE_NAME: &str = "google sheets";

/// Reads the action catalog from a Google Sheets value range using an API key.
#[derive(Debug, Clone)]
pub struct SheetsSource {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    spreadsheet_id: Option<String>,
    range: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsSource {
    pub const DEFAULT_BASE_URL: &'static str = "https://sheets.googleapis.com";

    pub fn new(client: reqwest::Client, config: &SheetsConfig) -> Self {
        Self {
            client,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_key: config.api_key.clone(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            range: config.range.clone(),
        }
    }

    /// Builds its own HTTP client bounded by `timeout`.
    pub fn with_timeout(config: &SheetsConfig, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client, config))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        let api_key = self.api_key.as_deref().filter(|key| !key.is_empty())?;
        let sheet_id = self.spreadsheet_id.as_deref().filter(|id| !id.is_empty())?;
        Some((api_key, sheet_id))
    }
}

#[async_trait]
impl ActionSource for SheetsSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(&self) -> Result<Value, SourceError> {
        let (api_key, sheet_id) = self
            .credentials()
            .ok_or(SourceError::NotConfigured("Google Sheets"))?;

        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url, sheet_id, self.range
        );
        debug!(range = %self.range, "requesting spreadsheet values");

        let response = self
            .client
            .get(&url)
            .query(&[("key", api_key)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let range: ValueRange = response.json().await?;
        rows_to_records(&range.values).map(Value::Array)
    }
}

/// First row is the header; later rows become records.
pub(crate) fn rows_to_records(rows: &[Vec<String>]) -> Result<Vec<Value>, SourceError> {
    let (headers, rows) = rows.split_first().ok_or(SourceError::Empty(SOURCE_NAME))?;
    let fields = header_fields(headers.iter().map(String::as_str));

    Ok(rows
        .iter()
        .filter_map(|row| row_to_record(&fields, row.iter().map(String::as_str)))
        .collect())
}

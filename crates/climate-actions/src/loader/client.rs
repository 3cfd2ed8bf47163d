use crate::catalog::status::{StatusUpdateAck, StatusUpdateRequest};
use crate::sources::{ActionSource, SourceError};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const ACTIONS_PATH: &str = "/api/actions";
const UPDATE_STATUS_PATH: &str = "/api/update-status";

/// Client for the dashboard service's read and status-update endpoints.
#[derive(Debug, Clone)]
pub struct ActionsClient {
    http: reqwest::Client,
    base_url: String,
}

impl ActionsClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn update_status(
        &self,
        request: &StatusUpdateRequest,
    ) -> Result<StatusUpdateAck, SourceError> {
        let url = format!("{}{UPDATE_STATUS_PATH}", self.base_url);
        debug!(action_id = %request.action_id, status = %request.new_status, "posting status update");

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ActionSource for ActionsClient {
    fn name(&self) -> &'static str {
        "actions api"
    }

    async fn fetch(&self) -> Result<Value, SourceError> {
        let url = format!("{}{ACTIONS_PATH}", self.base_url);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}

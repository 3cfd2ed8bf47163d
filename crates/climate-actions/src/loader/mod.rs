//! Turns one upstream read into a validated, display-ordered snapshot.

mod client;

pub use client::ActionsClient;

use crate::catalog::domain::ActionRecord;
use crate::catalog::schema::validate_actions;
use crate::catalog::sort::sort_actions;
use crate::sources::ActionSource;
use tracing::{debug, error};

/// Which stage of a load failed. Kept out of the error message so callers
/// only ever show the uniform text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailure {
    Transport,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to load climate actions data. Please check your data source configuration.")]
    Unavailable { kind: LoadFailure },
}

impl LoadError {
    pub fn kind(&self) -> LoadFailure {
        match self {
            LoadError::Unavailable { kind } => *kind,
        }
    }
}

/// Single attempt per call; retrying is left to whoever asked for the load.
#[derive(Debug, Clone)]
pub struct Loader<S> {
    source: S,
}

impl<S: ActionSource> Loader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn load(&self) -> Result<Vec<ActionRecord>, LoadError> {
        let payload = self.source.fetch().await.map_err(|err| {
            error!(source = self.source.name(), error = %err, "failed to fetch climate actions");
            LoadError::Unavailable {
                kind: LoadFailure::Transport,
            }
        })?;

        let records = validate_actions(&payload).map_err(|err| {
            error!(source = self.source.name(), error = %err, "climate actions failed validation");
            LoadError::Unavailable {
                kind: LoadFailure::Validation,
            }
        })?;

        debug!(source = self.source.name(), count = records.len(), "loaded climate actions");
        Ok(sort_actions(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourceError;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct StaticPayload(Result<Value, u16>);

    #[async_trait]
    impl ActionSource for StaticPayload {
        fn name(&self) -> &'static str {
            "static payload"
        }

        async fn fetch(&self) -> Result<Value, SourceError> {
            self.0
                .clone()
                .map_err(|status| SourceError::Status { status })
        }
    }

    fn record(id: &str, city: &str, status: &str) -> Value {
        json!({
            "id": id,
            "city": city,
            "country": "Brazil",
            "actionName": format!("Action {id}"),
            "category": "Mitigation",
            "sector": "Waste",
            "costTier": "Low",
            "status": status,
            "description": "",
            "lastUpdated": "2025-01-01"
        })
    }

    #[tokio::test]
    async fn load_validates_and_sorts() {
        let payload = json!([
            record("1", "Serra", "Completed"),
            record("2", "Recife", "In progress")
        ]);
        let records = Loader::new(StaticPayload(Ok(payload)))
            .load()
            .await
            .expect("load succeeds");
        let ids: Vec<_> = records.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[tokio::test]
    async fn transport_failures_are_uniform() {
        let err = Loader::new(StaticPayload(Err(500)))
            .load()
            .await
            .expect_err("load fails");
        assert_eq!(err.kind(), LoadFailure::Transport);
        assert_eq!(
            err.to_string(),
            "Failed to load climate actions data. Please check your data source configuration."
        );
    }

    #[tokio::test]
    async fn validation_failures_do_not_leak_detail() {
        let payload = json!([record("1", "Serra", "Paused")]);
        let err = Loader::new(StaticPayload(Ok(payload)))
            .load()
            .await
            .expect_err("load fails");
        assert_eq!(err.kind(), LoadFailure::Validation);
        assert!(!err.to_string().contains("Paused"));
    }

    #[tokio::test]
    async fn empty_payload_is_a_successful_load() {
        let records = Loader::new(StaticPayload(Ok(json!([]))))
            .load()
            .await
            .expect("empty load succeeds");
        assert!(records.is_empty());
    }
}

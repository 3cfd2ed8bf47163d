//! Upstream record sources behind the read endpoint.
//!
//! The service answers `GET /api/actions` from a Google Sheets range and falls
//! back to a static JSON snapshot; both sit behind [`ActionSource`] so the
//! loader sees a single logical read.

pub mod csv_import;
mod fallback;
mod mapping;
mod sheets;
mod snapshot;

pub use fallback::FallbackSource;
pub use sheets::SheetsSource;
pub use snapshot::SnapshotSource;

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

/// Raw, not yet validated, record payload provider.
#[async_trait]
pub trait ActionSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch(&self) -> Result<Value, SourceError>;
}

#[async_trait]
impl<T: ActionSource + ?Sized> ActionSource for std::sync::Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn fetch(&self) -> Result<Value, SourceError> {
        (**self).fetch().await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("{0} credentials not configured")]
    NotConfigured(&'static str),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream responded with status {status}")]
    Status { status: u16 },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no data found in {0}")]
    Empty(&'static str),
}

use super::{ActionSource, SourceError};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Static JSON snapshot of the catalog, regenerated by `build-data`.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ActionSource for SnapshotSource {
    fn name(&self) -> &'static str {
        "static snapshot"
    }

    async fn fetch(&self) -> Result<Value, SourceError> {
        debug!(path = %self.path.display(), "reading static snapshot");
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

use crate::models::{raw_rows_from_json, RawPropertyRecord};
use crate::sources::traits::PropertySource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Rows exported to a JSON file, for offline browsing and fixtures
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PropertySource for FileSource {
    async fn fetch_rows(&self) -> Result<Vec<RawPropertyRecord>> {
        debug!("Reading rows from {}", self.path.display());
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        raw_rows_from_json(&json).with_context(|| format!("Invalid rows in {}", self.path.display()))
    }

    fn source_name(&self) -> &'static str {
        "JSON file"
    }
}

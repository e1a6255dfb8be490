use crate::models::RawPropertyRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for all listing stores
/// A fetch is a single request: no retry, no pagination
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Fetch raw rows, newest first
    async fn fetch_rows(&self) -> Result<Vec<RawPropertyRecord>>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}

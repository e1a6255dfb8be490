pub mod file;
pub mod rest;
pub mod traits;

pub use file::FileSource;
pub use rest::RestSource;
pub use traits::PropertySource;

use crate::models::CanonicalProperty;
use crate::normalizer::{normalize_all, NormalizeOptions};
use anyhow::Result;
use tracing::info;

/// Fetch every row from `source` and normalize it.
///
/// Each call builds a fresh collection; nothing is cached between loads.
pub async fn load_listings(
    source: &dyn PropertySource,
    options: &NormalizeOptions,
) -> Result<Vec<CanonicalProperty>> {
    info!("Loading listings from {}", source.source_name());
    let rows = source.fetch_rows().await?;
    let listings = normalize_all(rows, options);
    info!("Loaded {} listings", listings.len());
    Ok(listings)
}

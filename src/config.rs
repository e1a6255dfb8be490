use crate::normalizer::{NormalizeOptions, DEFAULT_PLACEHOLDER_IMAGE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_STORE_URL: &str = "PROPERTY_STORE_URL";
pub const ENV_STORE_KEY: &str = "PROPERTY_STORE_KEY";
pub const ENV_STORE_TABLE: &str = "PROPERTY_STORE_TABLE";
pub const ENV_PLACEHOLDER_IMAGE: &str = "PROPERTY_PLACEHOLDER_IMAGE";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub listings: ListingsConfig,
}

/// Where listings live
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "StoreConfig::default_table")]
    pub table: String,
    #[serde(default = "StoreConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            table: Self::default_table(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl StoreConfig {
    fn default_table() -> String {
        "properties".to_string()
    }

    fn default_timeout_secs() -> u64 {
        30
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListingsConfig {
    #[serde(default = "ListingsConfig::default_placeholder_image")]
    pub placeholder_image: String,
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            placeholder_image: Self::default_placeholder_image(),
        }
    }
}

impl ListingsConfig {
    fn default_placeholder_image() -> String {
        DEFAULT_PLACEHOLDER_IMAGE.to_string()
    }
}

impl AppConfig {
    /// Load the optional JSON config file, then apply environment overrides
    /// (including a `.env` file in the working directory).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Non-empty values returned by `lookup` replace configured ones
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(ENV_STORE_URL) {
            self.store.url = Some(url);
        }
        if let Some(key) = lookup(ENV_STORE_KEY) {
            self.store.api_key = Some(key);
        }
        if let Some(table) = lookup(ENV_STORE_TABLE) {
            self.store.table = table;
        }
        if let Some(image) = lookup(ENV_PLACEHOLDER_IMAGE) {
            self.listings.placeholder_image = image;
        }
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            placeholder_image: self.listings.placeholder_image.clone(),
        }
    }
}

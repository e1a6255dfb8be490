use crate::admin::NewListing;
use crate::config::StoreConfig;
use crate::models::{raw_rows_from_json, RawPropertyRecord};
use crate::sources::traits::PropertySource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Listing store behind a PostgREST-style HTTP API (e.g. Supabase)
pub struct RestSource {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl RestSource {
    /// Create a REST source from store settings; both URL and API key are required
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let base_url = config
            .url
            .clone()
            .context("No store URL configured (set PROPERTY_STORE_URL)")?;
        let api_key = config
            .api_key
            .clone()
            .context("No store API key configured (set PROPERTY_STORE_KEY)")?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table: config.table.clone(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn fetch_request(&self) -> RequestBuilder {
        self.request(Method::GET)
            .query(&[("select", "*"), ("order", "created_at.desc")])
    }

    fn insert_request(&self, listing: &NewListing) -> RequestBuilder {
        self.request(Method::POST)
            .header("Prefer", "return=minimal")
            .json(&[listing])
    }

    fn update_request(&self, id: &str, listing: &NewListing) -> RequestBuilder {
        self.request(Method::PATCH)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=minimal")
            .json(listing)
    }

    fn delete_request(&self, id: &str) -> RequestBuilder {
        self.request(Method::DELETE)
            .query(&[("id", format!("eq.{}", id))])
    }

    /// Create a listing
    pub async fn insert(&self, listing: &NewListing) -> Result<()> {
        let response = self
            .insert_request(listing)
            .send()
            .await
            .context("Failed to send insert request")?;

        ensure_success(response, "insert property").await?;
        info!("Created property '{}'", listing.title);
        Ok(())
    }

    /// Replace the editable fields of listing `id`; blank optionals are sent as null
    pub async fn update(&self, id: &str, listing: &NewListing) -> Result<()> {
        let response = self
            .update_request(id, listing)
            .send()
            .await
            .context("Failed to send update request")?;

        ensure_success(response, "update property").await?;
        info!("Updated property {}", id);
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let response = self
            .delete_request(id)
            .send()
            .await
            .context("Failed to send delete request")?;

        ensure_success(response, "delete property").await?;
        info!("Deleted property {}", id);
        Ok(())
    }
}

async fn ensure_success(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!("Store returned status {} for {}: {}", status, action, body);
    anyhow::bail!("Failed to {}: {}", action, status);
}

#[async_trait]
impl PropertySource for RestSource {
    async fn fetch_rows(&self) -> Result<Vec<RawPropertyRecord>> {
        let url = self.table_url();
        debug!("Fetching URL: {}", url);

        let response = self
            .fetch_request()
            .send()
            .await
            .context("Failed to fetch properties")?;

        let body = ensure_success(response, "fetch properties")
            .await?
            .text()
            .await
            .context("Failed to read response body")?;
        debug!("Downloaded {} bytes of property rows", body.len());

        raw_rows_from_json(&body)
    }

    fn source_name(&self) -> &'static str {
        "REST store"
    }
}

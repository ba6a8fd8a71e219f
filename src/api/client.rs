use crate::api::traits::PropertySource;
use crate::api::types::ListQuery;
use crate::models::PropertyPage;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the properties API.
pub struct PropertiesClient {
    client: Client,
    base_url: String,
}

impl PropertiesClient {
    /// Create a new client against the given base URL
    /// (e.g. "http://127.0.0.1:5000").
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl PropertySource for PropertiesClient {
    async fn fetch_page(&self, query: &ListQuery) -> Result<PropertyPage> {
        let url = format!("{}/api/properties", self.base_url);

        debug!(
            "Fetching page {} (limit {}, term {:?}) from {}",
            query.page, query.limit, query.search_term, url
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("page", query.page.to_string()),
                ("limit", query.limit.to_string()),
                ("searchTerm", query.search_term.clone()),
            ])
            .send()
            .await
            .context("Failed to reach properties API")?;

        if !response.status().is_success() {
            warn!("Properties API returned status: {}", response.status());
            anyhow::bail!("Properties API request failed: {}", response.status());
        }

        let page: PropertyPage = response
            .json()
            .await
            .context("Failed to decode properties response")?;

        debug!("Received {} of {} properties", page.properties.len(), page.total);

        Ok(page)
    }

    fn source_name(&self) -> &'static str {
        "properties-api"
    }
}

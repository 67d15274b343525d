use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::DirectoryConfig;
use crate::directory::errors::DirectoryError;
use crate::directory::models::DirectoryEntry;
use crate::directory::ports::DirectoryClient;

/// Body returned by the upstream `/entries` endpoint.
///
/// Upstream reports `"entries": null` when a category has no match.
#[derive(Debug, Deserialize)]
struct EntriesResponse {
    #[serde(default)]
    entries: Option<Vec<DirectoryEntry>>,
}

/// reqwest-backed client for the public directory API.
///
/// One client is built at startup and reused, so connections are pooled
/// across requests. Every call is bounded by the configured timeout.
pub struct HttpDirectoryClient {
    http_client: Client,
    base_url: String,
}

impl HttpDirectoryClient {
    pub fn new(config: &DirectoryConfig) -> Result<Self, anyhow::Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create directory HTTP client")?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The category is appended as given, without percent-encoding.
    fn entries_url(&self, category: Option<&str>) -> String {
        format!(
            "{}/entries?category={}",
            self.base_url,
            category.unwrap_or_default()
        )
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn fetch_entries(
        &self,
        category: Option<String>,
    ) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        let url = self.entries_url(category.as_deref());
        tracing::debug!(url = %url, "Fetching directory entries");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| DirectoryError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::UnexpectedStatus(status.as_u16()));
        }

        let body: EntriesResponse = response
            .json()
            .await
            .map_err(|e| DirectoryError::InvalidResponse(e.to_string()))?;

        Ok(body.entries.unwrap_or_default())
    }
}

//! iTunes Search API HTTP client
//!
//! One GET per lookup, first result only. No API key required.
//!
//! API: https://itunes.apple.com/search

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::{adapter, dto};
use crate::config::ProviderConfig;
use crate::provider::domain::{ProviderError, ResolvedMetadata};

/// User agent sent with every request
const USER_AGENT: &str = concat!("Tunedeck/", env!("CARGO_PKG_VERSION"));

/// Search API client
pub struct ItunesClient {
    http_client: reqwest::Client,
    base_url: String,
    artwork_size: u32,
    country: Option<String>,
}

impl ItunesClient {
    /// Create a client from the provider settings
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let http_client = build_http_client(config.timeout())?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            artwork_size: config.artwork_size,
            country: config.country.clone(),
        })
    }

    /// Create a client for testing with custom base URL and timeout
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http_client: build_http_client(timeout).unwrap(),
            base_url: base_url.into(),
            artwork_size: 600,
            country: None,
        }
    }

    /// Search for the single best match for `query`.
    ///
    /// Blank queries return `Ok(None)` without touching the network.
    pub async fn search(
        &self,
        query: &str,
        token: &CancellationToken,
    ) -> Result<Option<ResolvedMetadata>, ProviderError> {
        if token.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }

        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let url = self.search_url(query);
        tracing::debug!(target: "provider", %url, "Searching");

        let response = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(ProviderError::Cancelled),
            response = self.send_search(&url) => response?,
        };

        Ok(adapter::to_metadata(response, self.artwork_size))
    }

    /// Download artwork bytes from `url`.
    pub async fn fetch_artwork(
        &self,
        url: &str,
        token: &CancellationToken,
    ) -> Result<Vec<u8>, ProviderError> {
        if token.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => Err(ProviderError::Cancelled),
            data = self.download(url) => data,
        }
    }

    fn search_url(&self, query: &str) -> String {
        let mut url = format!(
            "{}/search?term={}&media=music&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );
        if let Some(country) = self.country.as_deref().filter(|c| !c.is_empty()) {
            url.push_str("&country=");
            url.push_str(&urlencoding::encode(country));
        }
        url
    }

    /// Send the HTTP request and parse the response
    async fn send_search(&self, url: &str) -> Result<dto::SearchResponse, ProviderError> {
        let response = self
            .http_client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Http(status.as_u16()));
        }

        // The API answers with text/javascript, so decode by hand
        let body = response.bytes().await?;
        serde_json::from_slice::<dto::SearchResponse>(&body)
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Http(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Network(e.to_string()))
}

//! Upstream catalog client with timeout and error handling.
//!
//! # Responsibilities
//! - Build search URLs from the configured base address
//! - Issue one GET per call under connect and request deadlines
//! - Classify failures as network, status or decode errors

use std::time::Duration;

use url::Url;

use crate::catalog::types::{Envelope, FetchError};
use crate::config::UpstreamConfig;

/// HTTP client for the public catalog API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
}

impl UpstreamClient {
    /// Create a client for the configured upstream.
    pub fn new(config: &UpstreamConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("'{}': {}", config.base_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(FetchError::Network)?;

        tracing::debug!(base_url = %base_url, "Upstream client initialized");

        Ok(Self { http, base_url })
    }

    /// Build `{base}/{resource}/?search={query}&page={page}`.
    ///
    /// Empty `query` and `page` are sent as empty parameters, not omitted.
    pub fn search_url(&self, resource: &str, query: &str, page: &str) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(format!("'{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push(resource)
            .push("");
        url.query_pairs_mut()
            .clear()
            .append_pair("search", query)
            .append_pair("page", page);
        Ok(url)
    }

    /// Fetch one page of `resource` search results.
    ///
    /// The response body is read to the end or dropped before returning, so
    /// the connection is released on every path.
    pub async fn fetch(&self, resource: &str, query: &str, page: &str) -> Result<Envelope, FetchError> {
        let url = self.search_url(resource, query, page)?;

        tracing::debug!(url = %url, "Fetching from upstream");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(resource = %resource, status = %status, "Upstream returned non-success status");
            return Err(FetchError::UpstreamStatus(status));
        }

        let body = response.bytes().await.map_err(FetchError::Network)?;
        let envelope = serde_json::from_slice::<Envelope>(&body)?;
        Ok(envelope)
    }
}

//! GTFS-realtime HTTP client.
//!
//! Fetches protobuf feeds from the upstream endpoints and decodes them into
//! [`FeedSnapshot`]s.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use super::convert::decode_feed;
use super::endpoint::FeedEndpoint;
use super::error::FeedError;
use super::source::FeedSource;
use super::types::FeedSnapshot;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// API key sent as `x-api-key`. The subway feeds no longer require one,
    /// so an empty key sends no header at all.
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedClientConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for FeedClientConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// HTTP client for GTFS-realtime feeds.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    /// Create a new feed client with the given configuration.
    pub fn new(config: FeedClientConfig) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();

        if !config.api_key.is_empty() {
            let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| FeedError::Status {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
            headers.insert(HeaderName::from_static("x-api-key"), api_key);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }

    /// Fetch and decode one endpoint.
    pub async fn fetch_snapshot(&self, endpoint: &FeedEndpoint) -> Result<FeedSnapshot, FeedError> {
        let response = self.http.get(&endpoint.url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FeedError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FeedError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = response.bytes().await?;
        debug!(endpoint = %endpoint.id, bytes = body.len(), "Fetched feed");

        decode_feed(&endpoint.id, body)
    }
}

impl FeedSource for FeedClient {
    async fn fetch(&self, endpoint: &FeedEndpoint) -> Result<Arc<FeedSnapshot>, FeedError> {
        self.fetch_snapshot(endpoint).await.map(Arc::new)
    }
}

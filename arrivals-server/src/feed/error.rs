//! Feed client error types.

/// Errors from fetching or decoding a single feed endpoint.
///
/// These never escape the arrival aggregator; they are logged and recorded
/// against the endpoint that produced them.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, connect timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success status
    #[error("feed returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// API key rejected
    #[error("unauthorized: check MTA_API_KEY")]
    Unauthorized,

    /// Rate limited by the upstream
    #[error("rate limited by feed endpoint")]
    RateLimited,

    /// Body was not a valid GTFS-realtime message
    #[error("failed to decode feed: {0}")]
    Decode(String),

    /// Endpoint did not answer before its deadline
    #[error("feed request timed out")]
    Timeout,

    /// Mock data could not be loaded or is missing for an endpoint
    #[error("mock feed data: {0}")]
    MockData(String),
}

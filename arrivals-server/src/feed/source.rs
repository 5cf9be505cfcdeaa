//! The seam between the arrival pipeline and whatever produces snapshots.

use std::future::Future;
use std::sync::Arc;

use crate::cache::CachedFeedClient;

use super::client::FeedClient;
use super::endpoint::FeedEndpoint;
use super::error::FeedError;
use super::mock::MockFeedClient;
use super::types::FeedSnapshot;

/// Something that can produce a trip snapshot for an endpoint.
///
/// This abstraction allows the aggregator to be tested with canned feeds.
pub trait FeedSource {
    /// Fetch the current snapshot for `endpoint`.
    ///
    /// Failures are scoped to this endpoint only.
    fn fetch(
        &self,
        endpoint: &FeedEndpoint,
    ) -> impl Future<Output = Result<Arc<FeedSnapshot>, FeedError>> + Send;
}

/// The feed sources the server can be started with.
pub enum FeedBackend {
    /// Straight to the upstream feeds on every request.
    Live(FeedClient),

    /// Upstream feeds behind a short-lived snapshot cache.
    Cached(CachedFeedClient),

    /// Snapshots loaded from local JSON files.
    Mock(MockFeedClient),
}

impl FeedBackend {
    /// Short name for startup logging.
    pub fn describe(&self) -> &'static str {
        match self {
            FeedBackend::Live(_) => "live",
            FeedBackend::Cached(_) => "live (cached)",
            FeedBackend::Mock(_) => "mock",
        }
    }
}

impl FeedSource for FeedBackend {
    async fn fetch(&self, endpoint: &FeedEndpoint) -> Result<Arc<FeedSnapshot>, FeedError> {
        match self {
            FeedBackend::Live(client) => client.fetch(endpoint).await,
            FeedBackend::Cached(client) => client.fetch(endpoint).await,
            FeedBackend::Mock(client) => client.fetch(endpoint).await,
        }
    }
}

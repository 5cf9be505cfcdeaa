//! Caching layer for feed snapshots.
//!
//! Upstream feeds refresh roughly every 30 seconds, and every arrivals
//! request fans out to all of them. A short TTL per endpoint lets bursts of
//! requests share one fetch without serving noticeably stale predictions.
//!
//! Failed fetches are never cached, so a recovering endpoint is picked up
//! on the very next request.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::feed::{FeedClient, FeedEndpoint, FeedError, FeedSnapshot, FeedSource};

/// Cache key for snapshots: the endpoint id.
type SnapshotKey = String;

/// Cached snapshot entry.
type SnapshotEntry = Arc<FeedSnapshot>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Create a config with the given TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            ..Self::default()
        }
    }

    /// Whether caching is effectively disabled.
    pub fn is_disabled(&self) -> bool {
        self.ttl.is_zero()
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15),
            max_capacity: 64,
        }
    }
}

/// Feed client with a per-endpoint snapshot cache.
pub struct CachedFeedClient {
    client: FeedClient,
    snapshots: MokaCache<SnapshotKey, SnapshotEntry>,
}

impl CachedFeedClient {
    /// Create a new cached client.
    pub fn new(client: FeedClient, config: &CacheConfig) -> Self {
        let snapshots = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, snapshots }
    }

    /// Get cache statistics.
    pub fn entry_count(&self) -> u64 {
        self.snapshots.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.snapshots.invalidate_all();
    }
}

impl FeedSource for CachedFeedClient {
    async fn fetch(&self, endpoint: &FeedEndpoint) -> Result<Arc<FeedSnapshot>, FeedError> {
        // Try cache first
        if let Some(cached) = self.snapshots.get(&endpoint.id).await {
            trace!(endpoint = %endpoint.id, "Snapshot cache hit");
            return Ok(cached);
        }

        let snapshot = Arc::new(self.client.fetch_snapshot(endpoint).await?);
        self.snapshots
            .insert(endpoint.id.clone(), snapshot.clone())
            .await;

        Ok(snapshot)
    }
}

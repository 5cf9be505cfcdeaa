//! Mock feed client for running without upstream access.
//!
//! Loads snapshot files from a directory and serves them as if they were
//! live feeds. Arrival offsets in the files are relative to the moment of
//! the fetch, so the mock data never goes stale.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::endpoint::FeedEndpoint;
use super::error::FeedError;
use super::source::FeedSource;
use super::types::{FeedSnapshot, StopTimeUpdate, Trip};

/// A trip as written in a mock file.
#[derive(Debug, Clone, Deserialize)]
struct MockTrip {
    route_id: String,
    #[serde(default)]
    headsign: Option<String>,
    #[serde(default)]
    stops: Vec<MockStop>,
}

#[derive(Debug, Clone, Deserialize)]
struct MockStop {
    stop_id: String,
    /// Seconds from the fetch until arrival; may be negative.
    arrives_in_secs: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
struct MockFeedFile {
    trips: Vec<MockTrip>,
}

/// File stem a mock snapshot for `endpoint_id` is stored under.
///
/// Endpoint ids contain commas (`1,2,3,4,5,6,S`), which are replaced so the
/// files are easy to create: `1_2_3_4_5_6_S.json`.
pub fn mock_file_stem(endpoint_id: &str) -> String {
    endpoint_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Mock feed client that serves data from JSON files.
///
/// Endpoints with no file fail with [`FeedError::MockData`], which is a
/// convenient way to exercise partial outages locally.
#[derive(Debug, Clone)]
pub struct MockFeedClient {
    /// Pre-loaded trips, keyed by file stem.
    feeds: Arc<HashMap<String, Vec<MockTrip>>>,
}

impl MockFeedClient {
    /// Create a new mock client by loading JSON files from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, FeedError> {
        let data_dir = data_dir.as_ref();
        let mut feeds = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            FeedError::MockData(format!("failed to read {}: {e}", data_dir.display()))
        })?;

        for entry in entries {
            let path = entry
                .map_err(|e| FeedError::MockData(format!("failed to read directory entry: {e}")))?
                .path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let json = std::fs::read_to_string(&path)
                .map_err(|e| FeedError::MockData(format!("failed to read {}: {e}", path.display())))?;
            let file: MockFeedFile = serde_json::from_str(&json).map_err(|e| {
                FeedError::MockData(format!("failed to parse {}: {e}", path.display()))
            })?;

            feeds.insert(stem.to_string(), file.trips);
        }

        if feeds.is_empty() {
            return Err(FeedError::MockData(format!(
                "no mock feed files found in {}",
                data_dir.display()
            )));
        }

        Ok(Self {
            feeds: Arc::new(feeds),
        })
    }

    /// Build the snapshot for `endpoint` as seen at `now`.
    pub fn snapshot_at(
        &self,
        endpoint: &FeedEndpoint,
        now: DateTime<Utc>,
    ) -> Result<FeedSnapshot, FeedError> {
        let stem = mock_file_stem(&endpoint.id);
        let trips = self
            .feeds
            .get(&stem)
            .ok_or_else(|| FeedError::MockData(format!("no mock data for endpoint {}", endpoint.id)))?;

        let trips = trips
            .iter()
            .map(|t| Trip {
                route_id: t.route_id.clone(),
                headsign: t.headsign.clone(),
                stop_time_updates: t
                    .stops
                    .iter()
                    .map(|s| StopTimeUpdate {
                        stop_id: s.stop_id.clone(),
                        arrival: s.arrives_in_secs.map(|secs| now + Duration::seconds(secs)),
                    })
                    .collect(),
            })
            .collect();

        Ok(FeedSnapshot::new(endpoint.id.clone(), trips))
    }

    /// List the file stems that have mock data.
    pub fn available_feeds(&self) -> Vec<String> {
        let mut stems: Vec<String> = self.feeds.keys().cloned().collect();
        stems.sort();
        stems
    }
}

impl FeedSource for MockFeedClient {
    async fn fetch(&self, endpoint: &FeedEndpoint) -> Result<Arc<FeedSnapshot>, FeedError> {
        self.snapshot_at(endpoint, Utc::now()).map(Arc::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
        "trips": [
            {
                "route_id": "1",
                "headsign": "Van Cortlandt Park-242 St",
                "stops": [
                    { "stop_id": "127N", "arrives_in_secs": 120 },
                    { "stop_id": "126N", "arrives_in_secs": null }
                ]
            },
            { "route_id": "2", "stops": [] }
        ]
    }"#;

    fn write_sample(dir: &Path) {
        std::fs::write(dir.join("1_2_3_4_5_6_S.json"), SAMPLE).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();
    }

    #[test]
    fn file_stem_replaces_separators() {
        assert_eq!(mock_file_stem("1,2,3,4,5,6,S"), "1_2_3_4_5_6_S");
        assert_eq!(mock_file_stem("SIR"), "SIR");
    }

    #[test]
    fn load_and_serve_snapshot() {
        let dir = tempdir().unwrap();
        write_sample(dir.path());
        let client = MockFeedClient::new(dir.path()).unwrap();
        assert_eq!(client.available_feeds(), vec!["1_2_3_4_5_6_S".to_string()]);

        let now = Utc::now();
        let endpoint = FeedEndpoint::new("1,2,3,4,5,6,S", "http://unused");
        let snapshot = client.snapshot_at(&endpoint, now).unwrap();

        assert_eq!(snapshot.trips.len(), 2);
        let first = &snapshot.trips[0];
        assert_eq!(first.headsign.as_deref(), Some("Van Cortlandt Park-242 St"));
        assert_eq!(
            first.stop_time_updates[0].arrival,
            Some(now + Duration::seconds(120))
        );
        assert_eq!(first.stop_time_updates[1].arrival, None);
        assert_eq!(snapshot.trips[1].headsign, None);
    }

    #[tokio::test]
    async fn missing_endpoint_fails() {
        let dir = tempdir().unwrap();
        write_sample(dir.path());
        let client = MockFeedClient::new(dir.path()).unwrap();

        let result = client.fetch(&FeedEndpoint::new("L", "http://unused")).await;
        assert!(matches!(result, Err(FeedError::MockData(_))));
    }

    #[test]
    fn empty_directory_is_rejected() {
        let dir = tempdir().unwrap();
        assert!(MockFeedClient::new(dir.path()).is_err());
    }
}

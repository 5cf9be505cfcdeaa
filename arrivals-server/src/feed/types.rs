//! Decoded feed records.
//!
//! These are the only shapes the arrival pipeline sees; wire formats are
//! converted into them by [`super::convert`] and [`super::mock`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A prediction of when a vehicle reaches one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopTimeUpdate {
    /// Directional stop id, e.g. `127N`.
    pub stop_id: String,

    /// Predicted arrival. Absent for the origin terminal and for
    /// updates that only carry a departure.
    pub arrival: Option<DateTime<Utc>>,
}

impl StopTimeUpdate {
    pub fn new(stop_id: impl Into<String>, arrival: Option<DateTime<Utc>>) -> Self {
        Self {
            stop_id: stop_id.into(),
            arrival,
        }
    }
}

/// One vehicle currently tracked by a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// Upstream route id, possibly an express variant such as `6X`.
    pub route_id: String,

    /// Rider-facing destination label, when the feed provides one.
    pub headsign: Option<String>,

    /// Remaining stops, in travel order.
    pub stop_time_updates: Vec<StopTimeUpdate>,
}

impl Trip {
    pub fn new(route_id: impl Into<String>, headsign: Option<String>) -> Self {
        Self {
            route_id: route_id.into(),
            headsign,
            stop_time_updates: Vec::new(),
        }
    }

    /// Append a stop-time update (builder style, mostly for tests and mocks).
    pub fn with_stop(mut self, stop_id: impl Into<String>, arrival: Option<DateTime<Utc>>) -> Self {
        self.stop_time_updates
            .push(StopTimeUpdate::new(stop_id, arrival));
        self
    }
}

/// Everything one endpoint reported in a single fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedSnapshot {
    /// Id of the endpoint this snapshot came from.
    pub endpoint_id: String,

    pub trips: Vec<Trip>,
}

impl FeedSnapshot {
    pub fn new(endpoint_id: impl Into<String>, trips: Vec<Trip>) -> Self {
        Self {
            endpoint_id: endpoint_id.into(),
            trips,
        }
    }
}

//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::arrivals::{FeedReport, Ranking, RawArrival};

/// Shown when no feed had anything for the station.
pub const NO_ARRIVALS_MESSAGE: &str = "No upcoming arrivals found. Please check the station ID.";

/// Shown when every feed failed.
pub const FEEDS_UNAVAILABLE_MESSAGE: &str =
    "Live arrival feeds are currently unavailable. Please try again shortly.";

/// Query for `/api/arrivals`.
#[derive(Debug, Deserialize)]
pub struct ArrivalsRequest {
    /// Station id, e.g. `127`
    pub station_id: Option<String>,
}

/// An arrival in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrivalResult {
    pub route: String,
    pub direction: String,

    /// Wall-clock time, e.g. `02:07:30 PM`
    pub arrival_time: String,

    pub minutes_until_arrival: u32,
}

impl From<&RawArrival> for ArrivalResult {
    fn from(arrival: &RawArrival) -> Self {
        Self {
            route: arrival.route.clone(),
            direction: arrival.direction.clone(),
            arrival_time: arrival.arrival_time.clone(),
            minutes_until_arrival: arrival.minutes_until,
        }
    }
}

/// Response for `/api/arrivals`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ArrivalsResponse {
    Found {
        station_id: String,

        /// Next arrival per route and direction
        arrivals: Vec<ArrivalResult>,

        /// Every arrival within the horizon, for client-side filtering
        all_arrivals: Vec<ArrivalResult>,

        /// Set when some feed failed and the lists may be incomplete
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        degraded: bool,
    },
    Empty {
        station_id: String,

        /// Always empty; kept so clients can read `arrivals` unconditionally
        arrivals: Vec<ArrivalResult>,

        message: String,

        #[serde(skip_serializing_if = "std::ops::Not::not")]
        degraded: bool,
    },
}

impl ArrivalsResponse {
    /// Build the response for a ranked station.
    pub fn new(station_id: &str, ranking: Ranking, feeds: &FeedReport) -> Self {
        let degraded = feeds.is_degraded();
        match ranking {
            Ranking::Ranked { next_per_pair, all } => ArrivalsResponse::Found {
                station_id: station_id.to_string(),
                arrivals: next_per_pair.iter().map(ArrivalResult::from).collect(),
                all_arrivals: all.iter().map(ArrivalResult::from).collect(),
                degraded,
            },
            Ranking::NoArrivals => {
                let message = if feeds.is_outage() {
                    FEEDS_UNAVAILABLE_MESSAGE
                } else {
                    NO_ARRIVALS_MESSAGE
                };
                ArrivalsResponse::Empty {
                    station_id: station_id.to_string(),
                    arrivals: Vec::new(),
                    message: message.to_string(),
                    degraded,
                }
            }
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

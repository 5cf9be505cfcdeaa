//! Application state for the web layer.

use std::sync::Arc;

use crate::arrivals::ArrivalAggregator;
use crate::feed::FeedBackend;
use crate::stations::StationDirectory;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Arrival pipeline over the configured feed backend
    pub arrivals: Arc<ArrivalAggregator<FeedBackend>>,

    /// Station reference data
    pub stations: Arc<StationDirectory>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(arrivals: ArrivalAggregator<FeedBackend>, stations: StationDirectory) -> Self {
        Self {
            arrivals: Arc::new(arrivals),
            stations: Arc::new(stations),
        }
    }
}

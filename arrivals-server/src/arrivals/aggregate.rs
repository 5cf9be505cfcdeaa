//! Concurrent multi-feed arrival aggregation.
//!
//! Every request fans out to all configured endpoints at once. Each branch
//! gets its own deadline and its own error handling, so one slow or broken
//! upstream only makes the answer less complete, never late or failed.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, warn};

use crate::feed::{FeedEndpoint, FeedError, FeedSnapshot, FeedSource, Trip};
use crate::stations::StationResolver;

use super::config::ArrivalConfig;
use super::error::ArrivalError;
use super::route::{Heading, direction_label, normalize_route};
use super::time::{format_wall_clock, minutes_until};

/// One predicted arrival as shown to riders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawArrival {
    /// Display route, express variants folded (`6X` → `6`).
    pub route: String,

    /// Headsign, else the trip's destination name, else
    /// `Northbound`/`Southbound`.
    pub direction: String,

    /// Wall-clock arrival time in the display zone.
    pub arrival_time: String,

    /// Whole minutes until arrival, never negative.
    pub minutes_until: u32,
}

impl RawArrival {
    /// The (route, direction) pair arrivals are deduplicated on.
    pub fn pair(&self) -> (&str, &str) {
        (&self.route, &self.direction)
    }
}

/// An endpoint that could not contribute to this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointFailure {
    pub endpoint_id: String,
    pub error: String,
}

/// How the fan-out went, endpoint by endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedReport {
    /// Endpoints queried.
    pub checked: usize,

    /// Endpoints that returned a snapshot.
    pub succeeded: usize,

    /// Endpoints that failed, in configuration order.
    pub failures: Vec<EndpointFailure>,
}

impl FeedReport {
    /// Some endpoint failed, so results may be incomplete.
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }

    /// No endpoint answered at all.
    pub fn is_outage(&self) -> bool {
        self.checked > 0 && self.succeeded == 0
    }
}

/// Everything matched for one request, before ranking.
#[derive(Debug, Clone, Default)]
pub struct ArrivalSet {
    pub arrivals: Vec<RawArrival>,
    pub feeds: FeedReport,
}

/// Deadline used when the configured timeout does not fit in an `Instant`.
const MAX_FETCH_WAIT: std::time::Duration = std::time::Duration::from_secs(60 * 60);

/// Fans out to every feed endpoint and collects arrivals for a station.
pub struct ArrivalAggregator<F> {
    source: F,
    endpoints: Arc<[FeedEndpoint]>,
    resolver: Arc<dyn StationResolver>,
    config: ArrivalConfig,
}

impl<F: FeedSource + Sync> ArrivalAggregator<F> {
    pub fn new(
        source: F,
        endpoints: impl Into<Arc<[FeedEndpoint]>>,
        resolver: Arc<dyn StationResolver>,
        config: ArrivalConfig,
    ) -> Self {
        Self {
            source,
            endpoints: endpoints.into(),
            resolver,
            config,
        }
    }

    pub fn config(&self) -> &ArrivalConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &[FeedEndpoint] {
        &self.endpoints
    }

    /// Collect arrivals for `station_id` from every endpoint.
    pub async fn aggregate(&self, station_id: &str) -> Result<ArrivalSet, ArrivalError> {
        self.aggregate_with_clock(station_id, Utc::now).await
    }

    /// Like [`Self::aggregate`], reading "now" from `clock` once all feeds
    /// are in.
    pub async fn aggregate_with_clock<C>(
        &self,
        station_id: &str,
        clock: C,
    ) -> Result<ArrivalSet, ArrivalError>
    where
        C: FnOnce() -> DateTime<Utc>,
    {
        let station_id = station_id.trim();
        if station_id.is_empty() {
            return Err(ArrivalError::InvalidInput(
                "station_id parameter is required".to_string(),
            ));
        }

        let mut stop_ids = self.resolver.resolve_stops(station_id);
        if stop_ids.is_empty() {
            stop_ids.push(station_id.to_string());
        }

        let (snapshots, feeds) = self.fetch_all().await;
        let stop_names = self.resolver.stop_names();
        let arrivals = extract_arrivals(&snapshots, &stop_ids, &stop_names, clock(), &self.config);

        debug!(
            station = station_id,
            stops = ?stop_ids,
            arrivals = arrivals.len(),
            feeds_ok = feeds.succeeded,
            feeds_checked = feeds.checked,
            "Aggregated arrivals"
        );

        Ok(ArrivalSet { arrivals, feeds })
    }

    /// Fetch every endpoint concurrently.
    ///
    /// Snapshots come back in endpoint order regardless of which fetch
    /// finished first.
    async fn fetch_all(&self) -> (Vec<Arc<FeedSnapshot>>, FeedReport) {
        let start = Instant::now();
        let deadline = start
            .checked_add(self.config.effective_fetch_timeout())
            .unwrap_or_else(|| start + MAX_FETCH_WAIT);

        let futures: Vec<_> = self
            .endpoints
            .iter()
            .map(|endpoint| async move {
                let result = timeout_at(deadline, self.source.fetch(endpoint))
                    .await
                    .unwrap_or(Err(FeedError::Timeout));
                (endpoint, result)
            })
            .collect();

        let results = join_all(futures).await;

        let mut snapshots = Vec::with_capacity(results.len());
        let mut report = FeedReport {
            checked: results.len(),
            ..FeedReport::default()
        };

        for (endpoint, result) in results {
            match result {
                Ok(snapshot) => {
                    debug!(endpoint = %endpoint.id, trips = snapshot.trips.len(), "Feed ok");
                    report.succeeded += 1;
                    snapshots.push(snapshot);
                }
                Err(e) => {
                    warn!(endpoint = %endpoint.id, error = %e, "Feed unavailable, skipping");
                    report.failures.push(EndpointFailure {
                        endpoint_id: endpoint.id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        (snapshots, report)
    }
}

/// Match stop-time updates against the stations' directional stop ids.
///
/// Output order follows the input: snapshot, then stop, then heading (north
/// first), then trip. Updates without an arrival, or more than the grace
/// window in the past, are skipped; the rest are clamped to zero minutes.
///
/// Trips without a headsign are labelled with the name `stop_names` gives
/// their last reported stop.
pub fn extract_arrivals(
    snapshots: &[Arc<FeedSnapshot>],
    stop_ids: &[String],
    stop_names: &HashMap<String, String>,
    now: DateTime<Utc>,
    config: &ArrivalConfig,
) -> Vec<RawArrival> {
    let mut arrivals = Vec::new();
    let grace = config.grace_mins.max(0);

    for snapshot in snapshots {
        for stop_id in stop_ids {
            for heading in Heading::ALL {
                let key = heading.stop_id(stop_id);

                for trip in &snapshot.trips {
                    for update in trip.stop_time_updates.iter().filter(|u| u.stop_id == key) {
                        let Some(arrival) = update.arrival else {
                            continue;
                        };

                        let minutes = minutes_until(arrival, now, config.rounding);
                        if minutes < -grace {
                            continue;
                        }

                        arrivals.push(RawArrival {
                            route: normalize_route(&trip.route_id).to_string(),
                            direction: direction_label(
                                trip.headsign
                                    .as_deref()
                                    .filter(|h| !h.trim().is_empty())
                                    .or_else(|| destination_name(trip, stop_names)),
                                heading,
                            ),
                            arrival_time: format_wall_clock(arrival, config.display_tz),
                            minutes_until: u32::try_from(minutes.max(0)).unwrap_or(u32::MAX),
                        });
                    }
                }
            }
        }
    }

    arrivals
}

/// Name of the last stop a trip reports, looked up without its direction
/// suffix.
fn destination_name<'a>(trip: &Trip, stop_names: &'a HashMap<String, String>) -> Option<&'a str> {
    let last = &trip.stop_time_updates.last()?.stop_id;
    let station = last.strip_suffix(['N', 'S']).unwrap_or(last);
    stop_names.get(station).map(String::as_str)
}

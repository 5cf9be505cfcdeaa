//! Configuration for the arrival pipeline.

use std::time::Duration;

use chrono_tz::Tz;

use super::time::MinuteRounding;

/// Tuning parameters for aggregation and ranking.
#[derive(Debug, Clone)]
pub struct ArrivalConfig {
    /// Only arrivals at most this many minutes away are shown.
    pub horizon_mins: u32,

    /// How long after its predicted arrival a train is still listed
    /// (as "0 min"). Updates further in the past are dropped. Negative
    /// values behave like zero.
    pub grace_mins: i64,

    /// How fractional minutes are rounded before the grace check.
    pub rounding: MinuteRounding,

    /// Per-endpoint fetch deadline.
    pub fetch_timeout: Duration,

    /// Upper bound on the whole fan-out, whatever `fetch_timeout` says.
    pub request_deadline: Duration,

    /// Zone wall-clock arrival times are rendered in.
    pub display_tz: Tz,
}

impl ArrivalConfig {
    /// Set the display horizon.
    pub fn with_horizon(mut self, mins: u32) -> Self {
        self.horizon_mins = mins;
        self
    }

    /// Set the grace window.
    pub fn with_grace(mut self, mins: i64) -> Self {
        self.grace_mins = mins;
        self
    }

    /// Set the rounding mode.
    pub fn with_rounding(mut self, rounding: MinuteRounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Set the per-endpoint fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the overall request deadline.
    pub fn with_request_deadline(mut self, deadline: Duration) -> Self {
        self.request_deadline = deadline;
        self
    }

    /// Set the display time zone.
    pub fn with_display_tz(mut self, tz: Tz) -> Self {
        self.display_tz = tz;
        self
    }

    /// The deadline each endpoint fetch actually gets.
    pub fn effective_fetch_timeout(&self) -> Duration {
        self.fetch_timeout.min(self.request_deadline)
    }
}

impl Default for ArrivalConfig {
    fn default() -> Self {
        Self {
            horizon_mins: 30,
            grace_mins: 1,
            rounding: MinuteRounding::Round,
            fetch_timeout: Duration::from_secs(10),
            request_deadline: Duration::from_secs(15),
            display_tz: chrono_tz::America::New_York,
        }
    }
}

//! Arrival aggregation and ranking.
//!
//! This module answers "when is the next train at this station?":
//!
//! 1. [`ArrivalAggregator`] resolves the station to its stops, fetches every
//!    feed endpoint concurrently and extracts one [`RawArrival`] per matching
//!    stop-time update.
//! 2. [`rank`] trims that set to the display horizon, keeps the next train
//!    per route and direction, and orders both lists the way riders read a
//!    platform sign.

mod aggregate;
mod config;
mod error;
mod rank;
mod route;
mod time;

pub use aggregate::{
    ArrivalAggregator, ArrivalSet, EndpointFailure, FeedReport, RawArrival, extract_arrivals,
};
pub use config::ArrivalConfig;
pub use error::ArrivalError;
pub use rank::{Ranking, rank};
pub use route::{
    DirectionGroup, Heading, ROUTE_ORDER, UNKNOWN_ROUTE_RANK, direction_group, direction_label,
    normalize_route, route_rank,
};
pub use time::{InvalidRounding, MinuteRounding, format_wall_clock, minutes_until};

//! GTFS-realtime feed client.
//!
//! This module fetches live trip-update feeds and decodes them into
//! [`FeedSnapshot`]s: trips with a route, an optional headsign and the
//! predicted arrivals at each stop.
//!
//! Key characteristics of the subway feeds:
//! - Each endpoint covers one division (a handful of lines), so a full
//!   picture of a station needs every endpoint
//! - Stop ids carry a direction suffix (`127N`, `127S`)
//! - Arrival predictions are absolute POSIX timestamps
//! - Endpoints fail independently; callers must tolerate any subset being down

mod client;
mod convert;
mod endpoint;
mod error;
mod mock;
mod source;
mod types;

pub use client::{FeedClient, FeedClientConfig};
pub use convert::{convert_feed_message, decode_feed};
pub use endpoint::{FeedEndpoint, default_endpoints};
pub use error::FeedError;
pub use mock::{MockFeedClient, mock_file_stem};
pub use source::{FeedBackend, FeedSource};
pub use types::{FeedSnapshot, StopTimeUpdate, Trip};

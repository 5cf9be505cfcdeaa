//! Station reference data and stop resolution.
//!
//! The station list (`stations.json`) maps rider-facing station ids to
//! names, and groups multi-platform complexes under one id. It is read on
//! every request, so regenerating the file takes effect immediately.

mod directory;
mod error;
mod types;

pub use directory::{StationDirectory, StationResolver};
pub use error::StationError;
pub use types::{Station, StationSummary};

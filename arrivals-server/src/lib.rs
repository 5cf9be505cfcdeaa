//! Live subway arrivals server.
//!
//! A web service that answers: "when is the next train at this station?"
//! by merging every live subway feed into one arrival board.

pub mod arrivals;
pub mod cache;
pub mod config;
pub mod feed;
pub mod stations;
pub mod web;

//! Web layer for the arrivals service.
//!
//! Exposes the arrival pipeline and the station list as JSON, and serves the
//! static front end.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;

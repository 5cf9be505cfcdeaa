//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::arrivals::{ArrivalError, rank};
use crate::stations::{StationError, StationSummary};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory; anything not
/// under `/api` is served from it.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/arrivals", get(get_arrivals))
        .route("/api/stations", get(get_stations))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Next arrivals at a station, across every feed.
async fn get_arrivals(
    State(state): State<AppState>,
    Query(req): Query<ArrivalsRequest>,
) -> Result<Json<ArrivalsResponse>, AppError> {
    let station_id = req.station_id.unwrap_or_default();

    let set = state.arrivals.aggregate(&station_id).await?;
    let ranking = rank(set.arrivals, state.arrivals.config().horizon_mins);

    Ok(Json(ArrivalsResponse::new(
        station_id.trim(),
        ranking,
        &set.feeds,
    )))
}

/// Every station, without complex membership.
async fn get_stations(
    State(state): State<AppState>,
) -> Result<Json<Vec<StationSummary>>, AppError> {
    Ok(Json(state.stations.summaries()?))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<ArrivalError> for AppError {
    fn from(e: ArrivalError) -> Self {
        match e {
            ArrivalError::InvalidInput(message) => AppError::BadRequest { message },
        }
    }
}

impl From<StationError> for AppError {
    fn from(e: StationError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Rejected request");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

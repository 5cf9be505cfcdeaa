use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use arrivals_server::arrivals::ArrivalAggregator;
use arrivals_server::config::ServerConfig;
use arrivals_server::feed::default_endpoints;
use arrivals_server::stations::StationDirectory;
use arrivals_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("arrivals_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env();

    // Create the feed backend (fail fast on bad mock data or client setup)
    let backend = config
        .feed_backend()
        .expect("Failed to create feed backend");
    let backend_name = backend.describe();

    let stations = StationDirectory::new(&config.stations_path);
    if let Err(e) = stations.load() {
        tracing::warn!(error = %e, "Station data unavailable; /api/stations will fail");
    }

    let aggregator = ArrivalAggregator::new(
        backend,
        default_endpoints(),
        Arc::new(stations.clone()),
        config.arrivals.clone(),
    );
    info!(
        backend = backend_name,
        endpoints = aggregator.endpoints().len(),
        "Feed backend ready"
    );

    let state = AppState::new(aggregator, stations);
    let app = create_router(state, &config.static_dir);

    let addr = config.addr;
    info!("Subway arrivals listening on http://{addr}");
    info!("  GET  /health");
    info!("  GET  /api/stations");
    info!("  GET  /api/arrivals?station_id=<id>");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}

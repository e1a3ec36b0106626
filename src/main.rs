// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fieldfinder API Server
//!
//! Serves nearby sports facilities as map pins, with live open/closed status
//! and OpenStreetMap discovery.

use fieldfinder::{config::Config, db::FacilityStore, services::DiscoveryService, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Fieldfinder API");

    // Load facilities
    tracing::info!(path = %config.data_path.display(), "Loading facilities");
    let store = FacilityStore::open(&config.data_path).await?;
    tracing::info!(count = store.list_all().await.len(), "Facilities loaded");

    let discovery = DiscoveryService::new(config.overpass_url.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        discovery,
    });

    // Build router
    let app = fieldfinder::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fieldfinder=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}

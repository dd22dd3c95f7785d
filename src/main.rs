//! Application entry point for the `weatherwatch` backend service.
//!
//! This binary orchestrates the startup sequence for the weather API:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Building the provider aggregator for the configured cities
//! - Mounting all API routes via the `routes` gateway (EMBP pattern)
//! - Binding the Axum HTTP server and serving until Ctrl-C
//!
//! # Environment Variables
//! - `API_KEY` (**required**) – weather provider credential
//! - `PORT` (optional) – listen port (default: 5000)
//! - `WEATHER_API_URL` (optional) – provider base URL
//! - `PROVIDER_TIMEOUT_SECS` (optional) – per-request provider timeout
//! - `AXUM_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `AXUM_SPAN_EVENTS` (optional) – span event mode for tracing
use std::net::SocketAddr;

use anyhow::Result;
use axum::Router;
use dotenvy::dotenv;

use weatherwatch::{config, logging, routes, WeatherAggregator};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    logging::init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let aggregator = WeatherAggregator::new(&cfg)?;
    tracing::info!("Serving {} cities", aggregator.sources().len());

    // Build app from routes gateway (EMBP)
    let app: Router = routes::router(aggregator, cfg.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    tracing::info!("Server is running on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
    }
}

// src/routes/health.rs
//! Liveness endpoint for the weatherwatch backend.
//!
//! `/health` answers without calling the provider, so it stays green while
//! the upstream API is down. It reports how many cities the aggregator is
//! configured to fan out to.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    cities: usize,
}

/// Handle `GET /health`.
async fn health(State((aggregator, _config)): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        cities: aggregator.sources().len(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

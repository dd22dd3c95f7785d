//! Mocked daily summary endpoint.
//!
//! The backend keeps no history, so `/api/summary/{date}` echoes the requested
//! date with fixed figures. Real summaries are computed by the monitor from
//! its own history log.

use axum::{extract::Path, routing::get, Json, Router};

use crate::DailySummary;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/summary/{date}", get(handler))
}

async fn handler(Path(date): Path<String>) -> Json<DailySummary> {
    // ---
    Json(DailySummary {
        date,
        average_temp: 25.0,
        max_temp: 30.0,
        min_temp: 20.0,
        dominant_weather: Some("Clear".to_string()),
    })
}

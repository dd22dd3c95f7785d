use axum::{extract::State, routing::get, Json, Router};
use tracing::{debug, error, info};

use crate::{ApiError, Batch};

use super::AppState;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/weather", get(handler))
}

/// Handle `GET /api/weather`.
///
/// Always 200 with whatever cities succeeded, possibly none. A 500 is only
/// returned when the fan-out itself breaks.
async fn handler(
    State((aggregator, _config)): State<AppState>,
) -> Result<Json<Batch>, ApiError> {
    // ---
    info!("GET /api/weather - Starting fan-out");

    match aggregator.fetch_configured().await {
        Ok(batch) => {
            debug!("GET /api/weather - Returning {} records", batch.len());
            Ok(Json(batch))
        }
        Err(e) => {
            error!("Failed to fetch weather data: {}", e);
            Err(ApiError::from(e))
        }
    }
}

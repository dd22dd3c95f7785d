//! Route gateway: merges every endpoint subrouter and installs shared layers.

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{Config, WeatherAggregator};

mod health;
mod summary;
mod weather;

/// State shared by all handlers.
pub type AppState = (WeatherAggregator, Config);

// ---

pub fn router(aggregator: WeatherAggregator, config: Config) -> Router {
    // ---
    Router::new()
        .merge(weather::router())
        .merge(summary::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state((aggregator, config))
}

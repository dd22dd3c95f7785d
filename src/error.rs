//! Error kinds for outbound fetches and the HTTP error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---

/// Failure of a single outbound weather request.
///
/// Used both for per-city provider calls in the aggregator and for the
/// monitor's poll of `/api/weather`.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("source unavailable (HTTP {status})")]
    SourceUnavailable { status: u16 },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("request timed out")]
    TransportTimeout,

    #[error("transport error: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // ---
        if e.is_timeout() {
            Self::TransportTimeout
        } else {
            Self::Transport(e)
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Failure of the fan-out as a whole, as opposed to any single city.
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("fetch task failed to join: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// JSON error body returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl From<AggregateError> for ApiError {
    fn from(_: AggregateError) -> Self {
        // Callers get a generic message; details stay in the server log.
        Self::new("Failed to fetch weather data")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

//! `weatherwatch`: a weather aggregation backend and the polling monitor
//! that consumes it.
//!
//! Module layout follows the Explicit Module Boundary Pattern (EMBP): each
//! module exposes its public surface here, and siblings import through the
//! crate root rather than reaching into one another's internals.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod monitor;
pub mod routes;

pub use aggregator::WeatherAggregator;
pub use config::{Config, MonitorConfig};
pub use error::{AggregateError, ApiError, FetchError};
pub use models::{Batch, DailySummary, Record, Source, CITIES};

//! Configuration loader for the `weatherwatch` backend and monitor.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
use std::env;

use anyhow::{anyhow, Result};

use crate::monitor::Thresholds;

/// Parse an optional environment variable into `$ty`, with a default value.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        parse_env_opt!($var_name, $ty).unwrap_or($default)
    };
}

/// Parse an optional environment variable into `Option<$ty>`.
macro_rules! parse_env_opt {
    ($var_name:expr, $ty:ty) => {
        env::var($var_name)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Strongly typed backend configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Provider credential, sent as `appid`.
    pub api_key: String,

    /// Port the HTTP server binds on `0.0.0.0`.
    pub port: u16,

    /// Provider base URL (no trailing slash).
    pub weather_api_url: String,

    /// Optional per-request provider timeout in seconds.
    pub provider_timeout_secs: Option<u64>,
}

/// Load backend configuration from environment variables with defaults.
///
/// Required:
/// - `API_KEY` – provider credential
///
/// Optional:
/// - `PORT` – listen port (default: 5000)
/// - `WEATHER_API_URL` – provider base URL (default: OpenWeatherMap)
/// - `PROVIDER_TIMEOUT_SECS` – per-request timeout (default: none)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let api_key = require_env!("API_KEY");
    let port = parse_env!("PORT", u16, 5000);
    let weather_api_url = env::var("WEATHER_API_URL")
        .unwrap_or_else(|_| DEFAULT_WEATHER_API_URL.to_string())
        .trim_end_matches('/')
        .to_string();
    let provider_timeout_secs = parse_env_opt!("PROVIDER_TIMEOUT_SECS", u64);

    Ok(Config {
        api_key,
        port,
        weather_api_url,
        provider_timeout_secs,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the provider credential.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  API_KEY               : {}", mask_secret(&self.api_key));
        tracing::info!("  PORT                  : {}", self.port);
        tracing::info!("  WEATHER_API_URL       : {}", self.weather_api_url);
        tracing::info!(
            "  PROVIDER_TIMEOUT_SECS : {}",
            self.provider_timeout_secs
                .map_or_else(|| "none".to_string(), |s| s.to_string())
        );
    }
}

/// Monitor (polling client) configuration.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    // ---
    /// Base URL of the aggregator backend.
    pub backend_url: String,

    /// Seconds between polls.
    pub poll_interval_secs: u64,

    /// Alert thresholds in °C.
    pub thresholds: Thresholds,

    /// History file; `None` keeps history in memory for this session only.
    pub history_path: Option<String>,

    /// Rolling cap on history entries; `None` is unbounded.
    pub history_max_entries: Option<usize>,

    /// Rolling cap on retained alerts; `None` is unbounded.
    pub alerts_max: Option<usize>,
}

/// Load monitor configuration from environment variables with defaults.
///
/// Optional:
/// - `BACKEND_URL` (default: `http://localhost:5000`)
/// - `POLL_INTERVAL_SECS` (default: 300)
/// - `MAX_TEMP` / `MIN_TEMP` (default: 35 / 10)
/// - `HISTORY_PATH` (default: in-memory)
/// - `HISTORY_MAX_ENTRIES` (default: 2016, `0` = unbounded)
/// - `ALERTS_MAX` (default: 500, `0` = unbounded)
pub fn load_monitor_from_env() -> Result<MonitorConfig> {
    // ---
    let backend_url = env::var("BACKEND_URL")
        .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
        .trim_end_matches('/')
        .to_string();
    let poll_interval_secs = parse_env!("POLL_INTERVAL_SECS", u64, 300);
    if poll_interval_secs == 0 {
        return Err(anyhow!("Invalid POLL_INTERVAL_SECS: must be greater than 0"));
    }

    let thresholds = Thresholds {
        max: parse_env!("MAX_TEMP", f64, 35.0),
        min: parse_env!("MIN_TEMP", f64, 10.0),
    };
    if thresholds.min > thresholds.max {
        return Err(anyhow!(
            "Invalid thresholds: MIN_TEMP ({}) is above MAX_TEMP ({})",
            thresholds.min,
            thresholds.max
        ));
    }

    let history_path = env::var("HISTORY_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty());
    let history_max_entries = non_zero(parse_env!("HISTORY_MAX_ENTRIES", usize, 2016));
    let alerts_max = non_zero(parse_env!("ALERTS_MAX", usize, 500));

    Ok(MonitorConfig {
        backend_url,
        poll_interval_secs,
        thresholds,
        history_path,
        history_max_entries,
        alerts_max,
    })
}

impl MonitorConfig {
    pub fn log_config(&self) {
        // ---
        let cap = |c: Option<usize>| c.map_or_else(|| "unbounded".to_string(), |n| n.to_string());

        tracing::info!("Monitor configuration loaded:");
        tracing::info!("  BACKEND_URL         : {}", self.backend_url);
        tracing::info!("  POLL_INTERVAL_SECS  : {}", self.poll_interval_secs);
        tracing::info!("  MAX_TEMP            : {}", self.thresholds.max);
        tracing::info!("  MIN_TEMP            : {}", self.thresholds.min);
        tracing::info!(
            "  HISTORY_PATH        : {}",
            self.history_path.as_deref().unwrap_or("(in-memory)")
        );
        tracing::info!("  HISTORY_MAX_ENTRIES : {}", cap(self.history_max_entries));
        tracing::info!("  ALERTS_MAX          : {}", cap(self.alerts_max));
    }
}

fn non_zero(n: usize) -> Option<usize> {
    (n > 0).then_some(n)
}

/// Keep the first and last two characters of a secret, mask the rest.
fn mask_secret(secret: &str) -> String {
    // ---
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}****{}", head, tail)
}

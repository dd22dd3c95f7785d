//! Entry point for `weatherwatch-monitor`, the polling dashboard client.
//!
//! Polls the backend's `/api/weather` on a fixed interval, keeps the history
//! log in `HISTORY_PATH` (or in memory), and logs the rendered dashboard after
//! every cycle. Ctrl-C stops the session.
use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;

use weatherwatch::config;
use weatherwatch::logging;
use weatherwatch::monitor::{Accumulator, FileHistoryStore, HistoryStore, MemoryHistoryStore};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    logging::init_tracing();

    let cfg = config::load_monitor_from_env()?;
    cfg.log_config();

    let store: Box<dyn HistoryStore> = match &cfg.history_path {
        Some(path) => Box::new(FileHistoryStore::new(path)),
        None => Box::new(MemoryHistoryStore::new()),
    };

    let accumulator = Accumulator::new(
        &cfg.backend_url,
        cfg.thresholds,
        store,
        cfg.history_max_entries,
        cfg.alerts_max,
    );

    let session = accumulator.spawn(Duration::from_secs(cfg.poll_interval_secs));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down monitor");

    let accumulator = session.stop().await?;
    tracing::info!(
        "Session ended with {} history entries and {} alerts",
        accumulator.session().history.len(),
        accumulator.session().alerts.len()
    );
    Ok(())
}

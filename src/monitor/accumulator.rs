//! Polling loop that owns the session's history and alerts.

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::FetchError;
use crate::models::{Batch, DailySummary, Record};

use super::alerts::{check_alerts, AlertEvent, AlertLog, Thresholds};
use super::history::{HistoryEntry, HistoryLog};
use super::render::render_dashboard;
use super::store::HistoryStore;
use super::summary::summarize_day;

// ---

/// Mutable state of one monitoring session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    // ---
    pub history: HistoryLog,
    pub alerts: AlertLog,
    /// Batch from the most recent successful poll.
    pub latest: Batch,
}

pub struct Accumulator {
    // ---
    client: reqwest::Client,
    endpoint: String,
    thresholds: Thresholds,
    store: Box<dyn HistoryStore>,
    session: Session,
    /// Upper bound on one `/api/weather` request, body included.
    poll_timeout: Option<Duration>,
}

impl Accumulator {
    // ---
    /// Create an accumulator polling `{backend_url}/api/weather`.
    ///
    /// The persisted log is loaded from `store`. If it cannot be read the
    /// error is logged and the session starts empty; the file store moves an
    /// unparseable log aside first, so nothing on disk is overwritten.
    pub fn new(
        backend_url: &str,
        thresholds: Thresholds,
        store: Box<dyn HistoryStore>,
        history_cap: Option<usize>,
        alerts_cap: Option<usize>,
    ) -> Self {
        // ---
        let persisted = store.load().unwrap_or_else(|e| {
            warn!("Starting with empty history: {:#}", e);
            Vec::new()
        });
        info!("Loaded {} history entries", persisted.len());

        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/weather", backend_url.trim_end_matches('/')),
            thresholds,
            store,
            session: Session {
                history: HistoryLog::from_entries(persisted, history_cap),
                alerts: AlertLog::new(alerts_cap),
                latest: Vec::new(),
            },
            poll_timeout: None,
        }
    }

    /// Fail a poll that takes longer than `timeout`.
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = Some(timeout);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Request one batch from the aggregator.
    pub async fn poll(&self) -> Result<Batch, FetchError> {
        // ---
        match self.poll_timeout {
            Some(limit) => tokio::time::timeout(limit, self.fetch_batch())
                .await
                .map_err(|_| FetchError::TransportTimeout)?,
            None => self.fetch_batch().await,
        }
    }

    async fn fetch_batch(&self) -> Result<Batch, FetchError> {
        // ---
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::SourceUnavailable {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Append `batch` stamped now, persist, and return today's summary.
    pub fn record_and_summarize(&mut self, batch: Batch) -> Result<Option<DailySummary>> {
        self.record_and_summarize_at(batch, Utc::now())
    }

    /// As [`Self::record_and_summarize`] with an explicit timestamp.
    ///
    /// The entry stays in memory even if persisting fails; the error is
    /// still returned so the caller can report it.
    pub fn record_and_summarize_at(
        &mut self,
        batch: Batch,
        now: DateTime<Utc>,
    ) -> Result<Option<DailySummary>> {
        // ---
        self.session.history.push(HistoryEntry {
            timestamp: now,
            data: batch.clone(),
        });
        self.session.latest = batch;

        self.store.save(self.session.history.entries())?;
        debug!("Persisted {} history entries", self.session.history.len());

        Ok(self.summary_at(now))
    }

    /// Summary for the UTC day containing `now`, recomputed from the log.
    pub fn summary_at(&self, now: DateTime<Utc>) -> Option<DailySummary> {
        summarize_day(self.session.history.entries(), now.date_naive())
    }

    /// Check `batch` against the configured thresholds and keep the alerts.
    pub fn check_alerts(&mut self, batch: &[Record]) -> Vec<AlertEvent> {
        // ---
        let fresh = check_alerts(batch, &self.thresholds, Utc::now());
        for alert in &fresh {
            warn!("{}", alert.message);
        }
        self.session.alerts.extend(fresh.clone());
        fresh
    }

    pub fn render(&self, summary: Option<&DailySummary>) -> String {
        render_dashboard(&self.session.latest, summary, self.session.alerts.events())
    }

    /// One full cycle: poll, append, summarize, alert, render.
    ///
    /// A failed poll leaves the session untouched.
    pub async fn cycle(&mut self) {
        // ---
        let batch = match self.poll().await {
            Ok(batch) => batch,
            Err(e) => {
                error!("Error fetching weather data: {}", e);
                return;
            }
        };
        info!("Polled {} records", batch.len());

        let summary = match self.record_and_summarize(batch) {
            Ok(summary) => summary,
            Err(e) => {
                error!("Failed to persist history: {:#}", e);
                self.summary_at(Utc::now())
            }
        };

        let latest = self.session.latest.clone();
        self.check_alerts(&latest);

        info!("\n{}", self.render(summary.as_ref()));
    }

    /// Poll every `interval`, first tick immediately, until the handle stops.
    ///
    /// Cycles run back to back on one task and never overlap. Unless a
    /// shorter poll timeout was set, each poll is limited to one `interval`,
    /// so a request that never completes cannot stall later ticks.
    pub fn spawn(mut self, interval: Duration) -> SessionHandle {
        // ---
        let limit = self.poll_timeout.map_or(interval, |t| t.min(interval));
        self.poll_timeout = Some(limit);

        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = self.cycle() => {}
                }
            }
            info!("Polling stopped");
            self
        });

        SessionHandle { cancel, task }
    }
}

/// Owner of a running polling session.
pub struct SessionHandle {
    cancel: CancellationToken,
    task: JoinHandle<Accumulator>,
}

impl SessionHandle {
    /// Cancel the periodic trigger and hand back the accumulator.
    pub async fn stop(self) -> Result<Accumulator> {
        self.cancel.cancel();
        Ok(self.task.await?)
    }
}

//! Per-city fan-out against the weather provider.
//!
//! [`WeatherAggregator::fetch_all`] launches one task per [`Source`], waits for
//! every task, and merges the successful records in source declaration order.
//! A failing city is logged and dropped; it never fails the batch.

use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use crate::error::{AggregateError, FetchError};
use crate::models::{Batch, RawObservation, Record, Source, CITIES};
use crate::Config;

// ---

#[derive(Debug, Clone)]
pub struct WeatherAggregator {
    // ---
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    sources: Vec<Source>,
}

impl WeatherAggregator {
    // ---
    /// Build an aggregator for the compiled-in [`CITIES`] table.
    pub fn new(config: &Config) -> Result<Self> {
        // ---
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.provider_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.weather_api_url.clone(),
            api_key: config.api_key.clone(),
            sources: CITIES.to_vec(),
        })
    }

    /// Replace the configured sources.
    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Fetch the current observation for one city.
    #[instrument(skip(self), fields(city = source.name), level = "debug")]
    pub async fn fetch_one(&self, source: &Source) -> Result<Record, FetchError> {
        // ---
        let url = format!("{}/data/2.5/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("id", source.id.to_string()), ("appid", self.api_key.clone())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::SourceUnavailable {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!("Provider response for {}: {} bytes", source.name, body.len());

        let raw: RawObservation = serde_json::from_slice(&body)?;
        raw.to_record()
            .ok_or_else(|| FetchError::Parse("provider sent an empty `weather` array".into()))
    }

    /// Fetch every configured city.
    pub async fn fetch_configured(&self) -> Result<Batch, AggregateError> {
        self.fetch_all(&self.sources).await
    }

    /// Fetch all `sources` concurrently and merge the successes.
    ///
    /// Waits for every task before returning. Records keep the order of
    /// `sources`; failed cities are omitted. An empty batch is a valid result.
    /// Only a task that cannot be joined fails the whole call, and even then
    /// the remaining tasks are drained first.
    pub async fn fetch_all(&self, sources: &[Source]) -> Result<Batch, AggregateError> {
        // ---
        let mut set = JoinSet::new();
        for (idx, source) in sources.iter().copied().enumerate() {
            let aggregator = self.clone();
            set.spawn(async move {
                let outcome = aggregator.fetch_one(&source).await;
                (idx, source, outcome)
            });
        }

        let mut outcomes = Vec::with_capacity(sources.len());
        let mut join_error = None;
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    warn!("Fetch task did not complete: {}", e);
                    join_error.get_or_insert(e);
                }
            }
        }
        if let Some(e) = join_error {
            return Err(AggregateError::Join(e));
        }

        outcomes.sort_by_key(|(idx, _, _)| *idx);

        let mut batch = Vec::with_capacity(outcomes.len());
        for (_, source, outcome) in outcomes {
            match outcome {
                Ok(record) => batch.push(record),
                Err(e) => warn!(
                    "Error fetching weather data for city {} ({}): {}",
                    source.id, source.name, e
                ),
            }
        }

        info!("Fetched {} of {} cities", batch.len(), sources.len());
        Ok(batch)
    }
}

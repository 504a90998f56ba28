//! World population seed
//!
//! One GET against the World Bank indicator API. Whatever goes wrong, the
//! caller gets a number: failures are logged and replaced by
//! [`FALLBACK_POPULATION`].

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tickboard_core::FALLBACK_POPULATION;

/// Most recent world population records, newest first
pub const DEFAULT_POPULATION_ENDPOINT: &str =
    "https://api.worldbank.org/v2/country/WLD/indicator/SP.POP.TOTL?format=json&per_page=5";

/// Request timeout used when none is configured
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("population request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("population response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("population response contains no usable value")]
    NoValidData,
}

/// Extract the newest population figure from an indicator response.
///
/// The body looks like `[metadata, [{"value": 8.0e9, ...}, ...]]`. The first
/// record whose `value` is not `null` wins, a record without a `value` key
/// included; if that value is missing or not a number the response is
/// rejected.
pub fn parse_population(body: &str) -> Result<f64, FetchError> {
    let data: Value = serde_json::from_str(body)?;

    let records = data
        .get(1)
        .and_then(Value::as_array)
        .ok_or(FetchError::NoValidData)?;

    let latest = records
        .iter()
        .find(|record| !record.get("value").is_some_and(Value::is_null))
        .ok_or(FetchError::NoValidData)?;

    latest
        .get("value")
        .and_then(Value::as_f64)
        .ok_or(FetchError::NoValidData)
}

/// Client for the population endpoint
#[derive(Debug, Clone)]
pub struct PopulationFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl PopulationFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the population, falling back to [`FALLBACK_POPULATION`] on any error
    pub async fn fetch_population(&self) -> f64 {
        match self.try_fetch().await {
            Ok(population) => {
                log::info!("Fetched world population: {}", population);
                population
            }
            Err(e) => {
                log::warn!("Error fetching population, using fallback: {}", e);
                FALLBACK_POPULATION
            }
        }
    }

    /// Fetch the population, surfacing the failure reason
    pub async fn try_fetch(&self) -> Result<f64, FetchError> {
        log::debug!("Requesting population from {}", self.endpoint);
        let body = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_population(&body)
    }
}

impl Default for PopulationFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_POPULATION_ENDPOINT, DEFAULT_FETCH_TIMEOUT)
    }
}

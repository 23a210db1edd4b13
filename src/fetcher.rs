//! Weather fetching from the Open-Meteo API
//!
//! This module provides the HTTP client for retrieving per-city current and
//! hourly temperatures, and the batch fetch loop that isolates failures per
//! location so one unreachable city never aborts the cycle.

use crate::error::TempMapError;
use crate::models::{Location, WeatherSample, WeatherTable, openmeteo};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Source of weather samples.
///
/// Production code uses [`OpenMeteoClient`]; tests substitute a stub so the
/// batch semantics can be exercised without the network.
pub trait WeatherProvider {
    /// Fetch the current and hourly temperatures for one location
    fn fetch(&self, location: &Location) -> Result<WeatherSample, TempMapError>;
}

/// HTTP client for the `OpenMeteo` forecast API (no API key required)
pub struct OpenMeteoClient {
    /// HTTP client, carries the request timeout
    client: Client,
    /// Forecast endpoint base URL
    base_url: String,
}

impl OpenMeteoClient {
    /// Create a new client against the given forecast endpoint.
    ///
    /// The timeout bounds every per-location request so a single
    /// unresponsive city cannot stall the batch indefinitely.
    pub fn new<S: Into<String>>(base_url: S, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tempmap/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

impl WeatherProvider for OpenMeteoClient {
    #[instrument(skip(self, location), fields(location = %location.name))]
    fn fetch(&self, location: &Location) -> Result<WeatherSample, TempMapError> {
        debug!(
            "Requesting weather for {} ({})",
            location.name,
            location.format_coordinates()
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("hourly", "temperature_2m".to_string()),
            ])
            .send()
            .map_err(|e| TempMapError::network(&location.name, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TempMapError::network(
                &location.name,
                format!(
                    "HTTP {} - {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("unknown")
                ),
            ));
        }

        let forecast: openmeteo::ForecastResponse = response
            .json()
            .map_err(|e| TempMapError::malformed(&location.name, format!("invalid JSON body: {e}")))?;

        WeatherSample::from_openmeteo(forecast, location)
    }
}

/// Result of one complete fetch cycle: the surviving rows plus the
/// per-location failures that were isolated along the way.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Rows for the locations that succeeded, in input order
    pub table: WeatherTable,
    /// One error per failed location, for user-visible notification
    pub failures: Vec<TempMapError>,
}

/// Fetch all locations sequentially, isolating failures per location.
///
/// The batch call itself never fails: a location that errors is reported in
/// the outcome's `failures` and omitted from the table, and the surviving
/// rows keep the relative order of `locations`. Retries are the caller's
/// responsibility.
pub fn fetch_all<P: WeatherProvider>(provider: &P, locations: &[Location]) -> FetchOutcome {
    let mut samples = Vec::with_capacity(locations.len());
    let mut failures = Vec::new();

    for location in locations {
        match provider.fetch(location) {
            Ok(sample) => {
                debug!(
                    location = %location.name,
                    temperature = sample.current_temperature,
                    hours = sample.hourly_times.len(),
                    "Fetched weather sample"
                );
                samples.push(sample);
            }
            Err(e) => {
                warn!(location = %location.name, error = %e, "Fetch failed, omitting location");
                failures.push(e);
            }
        }
    }

    info!(
        "Fetch cycle complete: {} of {} locations succeeded",
        samples.len(),
        locations.len()
    );

    FetchOutcome {
        table: WeatherTable::new(samples),
        failures,
    }
}

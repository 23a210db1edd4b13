//! Data models for the temperature map pipeline
//!
//! This module contains the internal row types (one sample per city per
//! fetch cycle, collected into a table) and the external Open-Meteo
//! response types they are validated from.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One of the fixed geographic points tracked by the pipeline
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Location name (unique within the configured set)
    pub name: String,
    /// Latitude in decimal degrees (WGS84)
    pub latitude: f64,
    /// Longitude in decimal degrees (WGS84)
    pub longitude: f64,
}

impl Location {
    /// Create a new location
    pub fn new<S: Into<String>>(name: S, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Current and hourly temperature data for one location from one fetch cycle.
///
/// Constructed only through validated conversion from the provider response
/// and never mutated afterwards; a new fetch cycle supersedes it wholesale.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSample {
    /// Name of the location this sample belongs to
    pub location_name: String,
    /// Latitude in decimal degrees, carried for the map layer
    pub latitude: f64,
    /// Longitude in decimal degrees, carried for the map layer
    pub longitude: f64,
    /// Current temperature in Celsius
    pub current_temperature: f64,
    /// Hourly timestamps, ISO-8601, ascending
    pub hourly_times: Vec<String>,
    /// Hourly temperatures in Celsius, index-aligned with `hourly_times`
    pub hourly_temperatures: Vec<f64>,
}

/// Result of one fetch cycle: one row per successfully fetched location,
/// input order preserved. Regenerated wholesale on each cycle.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherTable {
    /// Successfully fetched samples in input location order
    pub samples: Vec<WeatherSample>,
    /// When this table was retrieved
    pub retrieved_at: DateTime<Utc>,
}

impl WeatherTable {
    /// Create a new table stamped with the current time
    #[must_use]
    pub fn new(samples: Vec<WeatherSample>) -> Self {
        Self {
            samples,
            retrieved_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Look up the sample for one location by name
    #[must_use]
    pub fn sample(&self, location_name: &str) -> Option<&WeatherSample> {
        self.samples
            .iter()
            .find(|s| s.location_name == location_name)
    }

    /// Check if this table is still within its validity window
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.retrieved_at < ttl
    }
}

/// `OpenMeteo` API response structures and conversion utilities
pub mod openmeteo {
    use super::{Location, WeatherSample};
    use crate::error::TempMapError;
    use serde::Deserialize;

    /// Forecast response from the `OpenMeteo` API, requested with
    /// `current_weather=true` and `hourly=temperature_2m`.
    ///
    /// Treated as an untrusted external schema: every field the pipeline
    /// needs is optional here and checked explicitly during conversion.
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current_weather: Option<CurrentWeather>,
        pub hourly: Option<HourlyData>,
    }

    /// Current conditions block from `OpenMeteo`
    #[derive(Debug, Deserialize)]
    pub struct CurrentWeather {
        pub temperature: f64,
    }

    /// Hourly temperature series from `OpenMeteo`
    #[derive(Debug, Deserialize)]
    pub struct HourlyData {
        pub time: Vec<String>,
        #[serde(rename = "temperature_2m")]
        pub temperature: Option<Vec<f64>>,
    }

    impl WeatherSample {
        /// Validate an `OpenMeteo` response into a sample for one location.
        ///
        /// Missing fields and mismatched series lengths become
        /// `MalformedResponse` errors instead of propagating as missing-field
        /// or out-of-bounds faults.
        pub fn from_openmeteo(
            response: ForecastResponse,
            location: &Location,
        ) -> Result<Self, TempMapError> {
            let current = response.current_weather.ok_or_else(|| {
                TempMapError::malformed(&location.name, "missing field `current_weather`")
            })?;

            let hourly = response
                .hourly
                .ok_or_else(|| TempMapError::malformed(&location.name, "missing field `hourly`"))?;

            let temperatures = hourly.temperature.ok_or_else(|| {
                TempMapError::malformed(&location.name, "missing field `hourly.temperature_2m`")
            })?;

            if hourly.time.len() != temperatures.len() {
                return Err(TempMapError::malformed(
                    &location.name,
                    format!(
                        "hourly series length mismatch: {} timestamps vs {} temperatures",
                        hourly.time.len(),
                        temperatures.len()
                    ),
                ));
            }

            Ok(WeatherSample {
                location_name: location.name.clone(),
                latitude: location.latitude,
                longitude: location.longitude,
                current_temperature: current.temperature,
                hourly_times: hourly.time,
                hourly_temperatures: temperatures,
            })
        }
    }
}

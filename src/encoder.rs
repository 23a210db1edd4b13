//! Visual encoding of weather samples
//!
//! Converts the fetched Celsius readings into the display unit and derives
//! the 3D column attributes: elevation in meters and an RGBA fill color on
//! a blue-to-red ramp. Elevation and color are always computed from the
//! Celsius magnitude so the map scale does not change with the display
//! unit; only `display_temperature` and the extracted series follow the
//! unit toggle.

use crate::models::{WeatherSample, WeatherTable};
use serde::{Deserialize, Serialize};

/// Meters of column height per degree Celsius
const METERS_PER_DEGREE: f64 = 3000.0;
/// Celsius temperature at which the color ramp leaves full blue
const RAMP_ORIGIN_CELSIUS: f64 = 15.0;
/// Intensity steps per degree Celsius; saturates at 40.5 degrees
const RAMP_SLOPE: f64 = 10.0;
/// Constant green channel
const FILL_GREEN: u8 = 100;
/// Constant alpha channel (partially transparent columns)
const FILL_ALPHA: u8 = 180;

/// Display unit for temperatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Convert a Celsius value into this unit
    #[must_use]
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
        }
    }

    /// Unit symbol for display
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

/// Convert Celsius to Fahrenheit
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Convert Fahrenheit to Celsius
#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Derived visual attributes for one location at one unit selection.
///
/// Ephemeral: recomputed whenever the unit or the source table changes,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedRow {
    /// Name of the encoded location
    pub location_name: String,
    /// Latitude in decimal degrees, the column's map position
    pub latitude: f64,
    /// Longitude in decimal degrees, the column's map position
    pub longitude: f64,
    /// Current temperature converted to the display unit
    pub display_temperature: f64,
    /// Column height in meters, always derived from Celsius
    pub elevation_meters: f64,
    /// RGBA fill color, always derived from Celsius
    pub fill_color: [u8; 4],
}

/// Column height for a Celsius temperature
#[must_use]
pub fn elevation_for_celsius(celsius: f64) -> f64 {
    celsius * METERS_PER_DEGREE
}

/// RGBA fill color for a Celsius temperature.
///
/// Red rises and blue falls as the temperature climbs above 15 degrees;
/// both saturate at 40.5 degrees. Green and alpha are constant, and red
/// plus blue always sums to 255.
#[must_use]
pub fn color_for_celsius(celsius: f64) -> [u8; 4] {
    let intensity = ((celsius - RAMP_ORIGIN_CELSIUS) * RAMP_SLOPE)
        .round()
        .clamp(0.0, 255.0) as u8;
    [intensity, FILL_GREEN, 255 - intensity, FILL_ALPHA]
}

/// Encode one sample at the given display unit
#[must_use]
pub fn encode_sample(sample: &WeatherSample, unit: TemperatureUnit) -> EncodedRow {
    let celsius = sample.current_temperature;
    EncodedRow {
        location_name: sample.location_name.clone(),
        latitude: sample.latitude,
        longitude: sample.longitude,
        display_temperature: unit.from_celsius(celsius),
        elevation_meters: elevation_for_celsius(celsius),
        fill_color: color_for_celsius(celsius),
    }
}

/// Encode every row of a table at the given display unit.
///
/// An empty table yields an empty row set; the input is not mutated.
#[must_use]
pub fn encode(table: &WeatherTable, unit: TemperatureUnit) -> Vec<EncodedRow> {
    table
        .samples
        .iter()
        .map(|sample| encode_sample(sample, unit))
        .collect()
}

/// Extract the aligned (timestamp, temperature) pairs for one location.
///
/// Timestamps are passed through unmodified; every temperature is converted
/// to the display unit.
#[must_use]
pub fn series_for(sample: &WeatherSample, unit: TemperatureUnit) -> Vec<(String, f64)> {
    sample
        .hourly_times
        .iter()
        .cloned()
        .zip(
            sample
                .hourly_temperatures
                .iter()
                .map(|&celsius| unit.from_celsius(celsius)),
        )
        .collect()
}

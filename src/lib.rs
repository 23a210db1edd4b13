//! `tempmap` - data pipeline for a 3D temperature column map of the Kyushu capitals
//!
//! This library fetches current and hourly temperatures for a fixed set of
//! cities from the Open-Meteo API, isolates per-city failures, caches the
//! result of a fetch cycle, and derives the visual encoding (column
//! elevation, RGBA fill color) consumed by the map layer.

pub mod cache;
pub mod config;
pub mod encoder;
pub mod error;
pub mod fetcher;
pub mod models;

// Re-export core types for public API
pub use cache::TableCache;
pub use config::AppConfig;
pub use encoder::{EncodedRow, TemperatureUnit, encode, series_for};
pub use error::TempMapError;
pub use fetcher::{FetchOutcome, OpenMeteoClient, WeatherProvider, fetch_all};
pub use models::{Location, WeatherSample, WeatherTable};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

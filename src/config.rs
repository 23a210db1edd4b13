//! Configuration management for the `tempmap` pipeline
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings. The tracked
//! location set ships with the seven Kyushu capitals as defaults.

use crate::error::TempMapError;
use crate::models::Location;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Root configuration structure for the `tempmap` pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Tracked locations, one table row each
    #[serde(default = "default_locations")]
    pub locations: Vec<LocationConfig>,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Forecast endpoint URL (no API key required for OpenMeteo)
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Fetch cycle result validity window in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u32,
}

/// One configured location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<LocationConfig> for Location {
    fn from(config: LocationConfig) -> Self {
        Location::new(config.name, config.latitude, config.longitude)
    }
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_cache_ttl() -> u32 {
    600
}

fn default_locations() -> Vec<LocationConfig> {
    [
        ("Fukuoka", 33.5904, 130.4017),
        ("Saga", 33.2494, 130.2974),
        ("Nagasaki", 32.7450, 129.8739),
        ("Kumamoto", 32.7900, 130.7420),
        ("Oita", 33.2381, 131.6119),
        ("Miyazaki", 31.9110, 131.4240),
        ("Kagoshima", 31.5600, 130.5580),
    ]
    .into_iter()
    .map(|(name, latitude, longitude)| LocationConfig {
        name: name.to_string(),
        latitude,
        longitude,
    })
    .collect()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_cache_ttl(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            cache: CacheConfig::default(),
            locations: default_locations(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with TEMPMAP_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TEMPMAP")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tempmap").join("config.toml"))
    }

    /// The configured locations as model types, in configuration order
    #[must_use]
    pub fn locations(&self) -> Vec<Location> {
        self.locations.iter().cloned().map(Location::from).collect()
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_locations()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(TempMapError::config(
                "Weather API timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.cache.ttl_seconds == 0 || self.cache.ttl_seconds > 86_400 {
            return Err(TempMapError::config(
                "Cache TTL must be between 1 second and 24 hours",
            )
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(TempMapError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    /// Validate the configured location set
    fn validate_locations(&self) -> Result<()> {
        if self.locations.is_empty() {
            return Err(TempMapError::config("At least one location must be configured").into());
        }

        let mut seen = HashSet::new();
        for location in &self.locations {
            if location.name.trim().is_empty() {
                return Err(TempMapError::validation("Location name cannot be empty").into());
            }

            if !seen.insert(location.name.as_str()) {
                return Err(TempMapError::validation(format!(
                    "Duplicate location name: {}",
                    location.name
                ))
                .into());
            }

            if !(-90.0..=90.0).contains(&location.latitude) {
                return Err(TempMapError::validation(format!(
                    "Latitude for {} must be between -90 and 90, got: {}",
                    location.name, location.latitude
                ))
                .into());
            }

            if !(-180.0..=180.0).contains(&location.longitude) {
                return Err(TempMapError::validation(format!(
                    "Longitude for {} must be between -180 and 180, got: {}",
                    location.name, location.longitude
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(
            config.weather.base_url,
            "https://api.open-meteo.com/v1/forecast"
        );
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.cache.ttl_seconds, 600);
        assert_eq!(config.locations.len(), 7);
        assert_eq!(config.locations[0].name, "Fukuoka");
        assert_eq!(config.locations[6].name, "Kagoshima");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_locations_conversion_preserves_order() {
        let config = AppConfig::default();
        let locations = config.locations();
        let names: Vec<&str> = locations.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            ["Fukuoka", "Saga", "Nagasaki", "Kumamoto", "Oita", "Miyazaki", "Kagoshima"]
        );
        assert_eq!(locations[0].latitude, 33.5904);
        assert_eq!(locations[0].longitude, 130.4017);
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = AppConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));

        let mut config = AppConfig::default();
        config.cache.ttl_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_base_url() {
        let mut config = AppConfig::default();
        config.weather.base_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("base URL"));
    }

    #[test]
    fn test_config_validation_coordinate_ranges() {
        let mut config = AppConfig::default();
        config.locations[0].latitude = 91.0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Latitude"));

        let mut config = AppConfig::default();
        config.locations[0].longitude = -181.0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Longitude"));
    }

    #[test]
    fn test_config_validation_duplicate_names() {
        let mut config = AppConfig::default();
        config.locations[1].name = "Fukuoka".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Duplicate"));
    }

    #[test]
    fn test_config_validation_empty_locations() {
        let mut config = AppConfig::default();
        config.locations.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_path_generation() {
        let path = AppConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("tempmap"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}

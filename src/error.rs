//! Error types and handling for the `tempmap` pipeline

use thiserror::Error;

/// Main error type for the `tempmap` pipeline
#[derive(Error, Debug)]
pub enum TempMapError {
    /// Request could not be completed (timeout, connection failure, non-2xx status)
    #[error("Network error for {location}: {message}")]
    Network { location: String, message: String },

    /// Response parsed but lacks required fields or has mismatched series lengths
    #[error("Malformed response for {location}: {message}")]
    MalformedResponse { location: String, message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl TempMapError {
    /// Create a new network error for one location
    pub fn network<L: Into<String>, M: Into<String>>(location: L, message: M) -> Self {
        Self::Network {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a new malformed-response error for one location
    pub fn malformed<L: Into<String>, M: Into<String>>(location: L, message: M) -> Self {
        Self::MalformedResponse {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// The location this error was isolated to, if any
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        match self {
            TempMapError::Network { location, .. }
            | TempMapError::MalformedResponse { location, .. } => Some(location),
            _ => None,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TempMapError::Network { location, .. } => {
                format!("Error fetching {location}: unable to reach the weather service.")
            }
            TempMapError::MalformedResponse { location, .. } => {
                format!("Error fetching {location}: the weather service returned unusable data.")
            }
            TempMapError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TempMapError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}

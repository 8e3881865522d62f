//! Error types for AQI computation and snapshot reading

use thiserror::Error;

/// Result type alias for AQI operations
pub type Result<T> = std::result::Result<T, AqiError>;

/// Errors that can occur while reading snapshots or aggregating readings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AqiError {
    /// No reading was available to aggregate
    #[error("Empty series: {0}")]
    EmptySeries(String),

    /// Snapshot document is not valid JSON or has the wrong shape
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Readings or humidity that cannot produce a meaningful AQI
    #[error("Invalid data values: {0}")]
    InvalidData(String),

    /// Missing required fields
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Reading a snapshot or configuration file failed
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration values are malformed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AqiError {
    /// Create a new `EmptySeries` error for a sensor
    #[must_use]
    pub fn empty_series(sensor: &str, what: &str) -> Self {
        Self::EmptySeries(format!("{sensor} has no {what}"))
    }

    /// Create a new `MissingField` error for a field of a sensor document
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::MissingField(field.to_string())
    }
}

impl From<serde_json::Error> for AqiError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson(err.to_string())
    }
}

impl From<std::io::Error> for AqiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

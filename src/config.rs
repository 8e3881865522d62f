//! Runtime configuration
//!
//! Read from an optional JSON file, then overridden by environment variables:
//!
//! ```json
//! { "sensor_ids": [1234, 5678], "humidity_correction": true, "data_dir": "/var/cache/purpleair" }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::correction::Correction;
use crate::error::{AqiError, Result};

/// Comma-separated list of sensor ids
pub const ENV_SENSORS: &str = "PURPLE_AQI_SENSORS";
/// Directory containing `<id>.json` snapshots
pub const ENV_DATA_DIR: &str = "PURPLE_AQI_DATA_DIR";
/// `0`, `false`, `off` or `no` disables the humidity correction
pub const ENV_CORRECTION: &str = "PURPLE_AQI_CORRECTION";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sensors to report, in display order
    pub sensor_ids: Vec<u32>,
    /// Apply the EPA humidity correction before conversion
    pub humidity_correction: bool,
    /// Where snapshot documents are read from
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sensor_ids: Vec::new(),
            humidity_correction: true,
            data_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    ///
    /// # Errors
    ///
    /// * `AqiError::Io` - The file could not be read
    /// * `AqiError::Config` - The file is not a valid configuration
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path)
            .map_err(|e| AqiError::Io(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&body)
            .map_err(|e| AqiError::Config(format!("{}: {e}", path.display())))
    }

    /// Default configuration with the process environment applied
    ///
    /// # Errors
    ///
    /// * `AqiError::Config` - An environment variable has a malformed value
    pub fn from_env() -> Result<Self> {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Override fields from variables supplied by `lookup`
    ///
    /// # Errors
    ///
    /// * `AqiError::Config` - A variable has a malformed value
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(ids) = lookup(ENV_SENSORS) {
            self.sensor_ids = parse_sensor_ids(&ids)?;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup(ENV_CORRECTION) {
            self.humidity_correction = parse_flag(&flag)?;
        }
        Ok(self)
    }

    /// Correction strategy selected by this configuration
    #[must_use]
    pub fn correction(&self) -> Correction {
        Correction::from_enabled(self.humidity_correction)
    }
}

fn parse_sensor_ids(ids: &str) -> Result<Vec<u32>> {
    ids.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse()
                .map_err(|_| AqiError::Config(format!("bad sensor id: {id}")))
        })
        .collect()
}

fn parse_flag(flag: &str) -> Result<bool> {
    match flag.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => Err(AqiError::Config(format!("bad {ENV_CORRECTION} value: {other}"))),
    }
}

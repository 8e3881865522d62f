//! PurpleAir AQI Summaries
//!
//! This crate turns PurpleAir PM2.5 snapshots into the US EPA Air Quality Index:
//! - EPA humidity correction of raw PM2.5 readings
//! - Piecewise-linear PM2.5 to AQI conversion
//! - Severity tiers for AQI values
//! - Per-sensor aggregation of channels and a trend arrow
//! - A compact status-bar report
//!
//! # Example
//!
//! ```rust
//! use purple_aqi::{Correction, SensorSnapshot, Severity, summarize};
//!
//! let snapshot = SensorSnapshot {
//!     id: 1234,
//!     name: "Backyard".into(),
//!     lat: 37.77,
//!     lon: -122.42,
//!     humidity: Some(40.0),
//!     series: vec![vec![35.0, 30.0, 28.0, 25.0], vec![33.0, 29.0]],
//! };
//!
//! let summary = summarize(&snapshot, Correction::Epa).unwrap();
//! println!("{}: {}{}", summary.name, summary.aqi, summary.trend.glyph());
//! assert_eq!(summary.severity, Severity::Moderate);
//! ```

pub mod aggregate;
pub mod aqi;
pub mod config;
pub mod correction;
pub mod error;
pub mod report;
pub mod severity;
pub mod snapshot;

pub use aggregate::{Aggregator, SensorSummary, Trend};
pub use aqi::{AqiValue, aqi_from_concentration, to_aqi};
pub use config::Config;
pub use correction::{Correction, epa_correct};
pub use error::{AqiError, Result};
pub use report::Report;
pub use severity::Severity;
pub use snapshot::{DirectorySource, FakeSource, SensorSnapshot, Series, SnapshotSource};

/// Main entry point for summarizing one sensor
///
/// # Arguments
///
/// * `snapshot` - Latest readings of the sensor
/// * `correction` - Whether to humidity-correct readings before conversion
///
/// # Returns
///
/// * `Ok(SensorSummary)` - Combined AQI, trend and severity
/// * `Err(AqiError)` - The snapshot has no usable readings
///
/// # Errors
///
/// * `AqiError::EmptySeries` - No channel has a reading, or the primary channel is empty
pub fn summarize(snapshot: &SensorSnapshot, correction: Correction) -> Result<SensorSummary> {
    Aggregator::new(correction).summarize(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backyard() -> SensorSnapshot {
        SensorSnapshot {
            id: 1234,
            name: "Backyard".into(),
            lat: 37.77,
            lon: -122.42,
            humidity: Some(40.0),
            series: vec![vec![35.0, 30.0, 28.0, 25.0], vec![33.0, 29.0]],
        }
    }

    #[test]
    fn test_summarize_corrected() {
        // 35 and 33 µg/m³ at 40% correct to 20.51 and 19.47 -> 69 and 66,
        // and 67.5 rounds to even
        let summary = summarize(&backyard(), Correction::Epa).unwrap();
        assert_eq!(summary.aqi, 68);
        assert_eq!(summary.severity, Severity::Moderate);
        // primary 69 vs mean 62.75
        assert_eq!(summary.trend, Trend::Rising);
    }

    #[test]
    fn test_summarize_uncorrected() {
        // 35 and 33 µg/m³ -> 99 and 95; primary 99 vs mean 87.5
        let summary = summarize(&backyard(), Correction::None).unwrap();
        assert_eq!(summary.aqi, 97);
        assert_eq!(summary.trend, Trend::Rising);
    }

    #[test]
    fn test_summarize_empty() {
        let snapshot = SensorSnapshot {
            series: vec![],
            ..backyard()
        };
        assert!(matches!(
            summarize(&snapshot, Correction::Epa),
            Err(AqiError::EmptySeries(_))
        ));
    }
}

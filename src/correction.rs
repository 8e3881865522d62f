//! Humidity correction for low-cost PM2.5 sensors
//!
//! PurpleAir sensors over-report PM2.5 in humid air. The US EPA published a
//! linear correction that brings readings close to reference-grade monitors:
//! <https://www.epa.gov/air-sensor-toolbox/technical-approaches-sensor-data-airnow-fire-and-smoke-map>

use crate::error::{AqiError, Result};

/// Slope applied to the raw PM2.5 reading
pub const PM_COEFFICIENT: f64 = 0.52;
/// Slope applied to relative humidity (percent)
pub const HUMIDITY_COEFFICIENT: f64 = 0.085;
/// Constant offset in µg/m³
pub const OFFSET: f64 = 5.71;

/// Apply the EPA PM2.5 humidity correction.
///
/// `humidity` is relative humidity in percent. It is not validated: values
/// outside 0..=100 produce a correspondingly meaningless result, so callers
/// are expected to pass sensor-reported humidity through unchanged.
///
/// # Example
///
/// ```rust
/// use purple_aqi::correction::epa_correct;
///
/// let corrected = epa_correct(100.0, 50.0);
/// assert!((corrected - 53.46).abs() < 1e-9);
/// ```
#[must_use]
pub fn epa_correct(pm: f64, humidity: f64) -> f64 {
    let adjusted = PM_COEFFICIENT * pm - HUMIDITY_COEFFICIENT * humidity + OFFSET;
    tracing::trace!(pm, humidity, adjusted, "epa correction");
    adjusted
}

/// Correction step applied to each reading before AQI conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Correction {
    /// Use the raw sensor reading as-is
    None,
    /// Apply [`epa_correct`] with the sensor's humidity
    #[default]
    Epa,
}

impl Correction {
    /// Build the correction strategy from a simple on/off toggle
    #[must_use]
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::Epa } else { Self::None }
    }

    /// Adjust a raw reading according to this strategy.
    ///
    /// Humidity is only consulted by [`Correction::Epa`].
    ///
    /// # Errors
    ///
    /// * `AqiError::MissingField` - EPA correction without a humidity reading
    pub fn apply(self, pm: f64, humidity: Option<f64>) -> Result<f64> {
        match self {
            Self::None => Ok(pm),
            Self::Epa => humidity
                .map(|humidity| epa_correct(pm, humidity))
                .ok_or_else(|| AqiError::missing_field("humidity")),
        }
    }
}

//! PM2.5 concentration to US EPA Air Quality Index conversion
//!
//! Breakpoints follow the EPA table in effect when PurpleAir introduced its
//! corrected map layer. Each segment maps a concentration interval linearly
//! onto an AQI interval:
//!
//! ```text
//! AQI = (AQI_high - AQI_low) / (C_high - C_low) * (C - C_low) + AQI_low
//! ```

use std::fmt;

use crate::correction::epa_correct;

/// Concentrations outside `0.0..=DOMAIN_MAX` are not converted
pub const DOMAIN_MAX: f64 = 1000.0;

/// One concentration breakpoint segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub aqi_low: f64,
    pub aqi_high: f64,
    pub conc_low: f64,
    pub conc_high: f64,
}

impl Segment {
    const fn new(aqi_low: f64, aqi_high: f64, conc_low: f64, conc_high: f64) -> Self {
        Self {
            aqi_low,
            aqi_high,
            conc_low,
            conc_high,
        }
    }

    /// Interpolate `pm` within this segment, without rounding
    #[must_use]
    pub fn interpolate(&self, pm: f64) -> f64 {
        let aqi_span = self.aqi_high - self.aqi_low;
        let conc_span = self.conc_high - self.conc_low;
        (aqi_span / conc_span) * (pm - self.conc_low) + self.aqi_low
    }
}

/// Segments selected when the concentration is strictly above `conc_low`,
/// highest first. A concentration equal to a boundary stays in the lower segment.
pub static SEGMENTS: [Segment; 5] = [
    Segment::new(301.0, 400.0, 250.5, 350.4), // Hazardous
    Segment::new(201.0, 300.0, 150.5, 250.4), // Very Unhealthy
    Segment::new(151.0, 200.0, 55.5, 150.4),  // Unhealthy
    Segment::new(101.0, 150.0, 35.5, 55.4),   // Unhealthy for Sensitive Groups
    Segment::new(51.0, 100.0, 12.1, 35.4),    // Moderate
];

/// Segment used for everything at or below 12.1 µg/m³
pub static GOOD: Segment = Segment::new(0.0, 50.0, 0.0, 12.0);

/// Result of converting a concentration
///
/// Concentrations outside `0.0..=1000.0` are passed through unconverted as
/// [`AqiValue::Raw`]. Downstream averaging and classification treat the raw
/// concentration as if it were an index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AqiValue {
    /// Rounded AQI. Not clamped: concentrations above the table extrapolate
    /// along the top segment.
    Index(i64),
    /// Concentration that fell outside the convertible domain
    Raw(f64),
}

impl AqiValue {
    /// Numeric value used for averaging and classification
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(self) -> f64 {
        match self {
            Self::Index(aqi) => aqi as f64,
            Self::Raw(pm) => pm,
        }
    }
}

impl fmt::Display for AqiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(aqi) => write!(f, "{aqi}"),
            Self::Raw(pm) => write!(f, "{pm}"),
        }
    }
}

/// Round half to even, the policy used for every AQI rounding step
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_aqi(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Find the breakpoint segment for an in-domain concentration
#[must_use]
pub fn segment_for(pm: f64) -> &'static Segment {
    SEGMENTS
        .iter()
        .find(|segment| pm > segment.conc_low)
        .unwrap_or(&GOOD)
}

/// Convert an already-corrected PM2.5 concentration (µg/m³) to an AQI.
///
/// # Example
///
/// ```rust
/// use purple_aqi::aqi::{aqi_from_concentration, AqiValue};
///
/// assert_eq!(aqi_from_concentration(12.0), AqiValue::Index(50));
/// assert_eq!(aqi_from_concentration(41.0), AqiValue::Index(115));
/// assert_eq!(aqi_from_concentration(-3.5), AqiValue::Raw(-3.5));
/// ```
#[must_use]
pub fn aqi_from_concentration(pm: f64) -> AqiValue {
    if !(0.0..=DOMAIN_MAX).contains(&pm) {
        return AqiValue::Raw(pm);
    }
    AqiValue::Index(round_aqi(segment_for(pm).interpolate(pm)))
}

/// Humidity-correct a raw PM2.5 reading and convert it to an AQI.
///
/// The out-of-domain check applies to the corrected concentration, so a
/// corrected value below zero comes back as [`AqiValue::Raw`].
#[must_use]
pub fn to_aqi(pm: f64, humidity: f64) -> AqiValue {
    aqi_from_concentration(epa_correct(pm, humidity))
}

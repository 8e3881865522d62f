//! Combining a sensor's channels into one AQI and a trend

use serde::{Deserialize, Serialize};

use crate::aqi::{AqiValue, aqi_from_concentration, round_aqi};
use crate::correction::Correction;
use crate::error::{AqiError, Result};
use crate::severity::Severity;
use crate::snapshot::SensorSnapshot;

/// Minimum distance between the latest AQI and the series mean to call a trend
pub const TREND_THRESHOLD: f64 = 5.0;

/// Direction of the latest reading relative to the recent average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Flat,
}

impl Trend {
    /// Single-character arrow, a blank for `Flat`
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Rising => "↑",
            Self::Falling => "↓",
            Self::Flat => " ",
        }
    }
}

/// Aggregated view of one sensor, ready for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSummary {
    pub id: u32,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Mean of the channels' latest AQI values
    pub aqi: i64,
    pub trend: Trend,
    pub severity: Severity,
}

/// Converts snapshot readings to AQI values with an optional correction step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aggregator {
    pub correction: Correction,
}

impl Aggregator {
    #[must_use]
    pub fn new(correction: Correction) -> Self {
        Self { correction }
    }

    /// Convert one raw reading taken at `humidity`
    ///
    /// # Errors
    ///
    /// * `AqiError::MissingField` - The correction needs humidity and there is none
    pub fn convert(&self, pm: f64, humidity: Option<f64>) -> Result<AqiValue> {
        Ok(aqi_from_concentration(self.correction.apply(pm, humidity)?))
    }

    /// Representative AQI: the rounded mean of every channel's latest reading.
    ///
    /// Channels without readings are skipped.
    ///
    /// # Errors
    ///
    /// * `AqiError::EmptySeries` - No channel has a reading
    /// * `AqiError::MissingField` - The correction needs humidity and there is none
    /// * `AqiError::InvalidData` - The mean is not a finite number
    pub fn combine(&self, snapshot: &SensorSnapshot) -> Result<i64> {
        let values = snapshot
            .series
            .iter()
            .filter_map(|series| series.first())
            .map(|&pm| self.convert(pm, snapshot.humidity))
            .collect::<Result<Vec<_>>>()?;

        let mean = mean(&values)
            .ok_or_else(|| AqiError::empty_series(&snapshot.name, "channel readings"))?;
        Ok(round_aqi(ensure_finite(&snapshot.name, mean)?))
    }

    /// Compare the primary channel's latest AQI with its mean over all samples.
    ///
    /// # Errors
    ///
    /// * `AqiError::EmptySeries` - There is no primary channel, or it has no readings
    /// * `AqiError::MissingField` - The correction needs humidity and there is none
    /// * `AqiError::InvalidData` - The mean is not a finite number
    pub fn trend(&self, snapshot: &SensorSnapshot) -> Result<Trend> {
        let values = snapshot
            .series
            .first()
            .map(|series| {
                series
                    .iter()
                    .map(|&pm| self.convert(pm, snapshot.humidity))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();

        let (Some(latest), Some(avg)) = (values.first(), mean(&values)) else {
            return Err(AqiError::empty_series(&snapshot.name, "primary readings"));
        };
        let avg = ensure_finite(&snapshot.name, avg)?;
        let latest = latest.value();

        let trend = if (avg - latest).abs() < TREND_THRESHOLD {
            Trend::Flat
        } else if latest < avg {
            Trend::Falling
        } else if latest > avg {
            Trend::Rising
        } else {
            Trend::Flat
        };
        Ok(trend)
    }

    /// Combine, trend and classify a snapshot
    ///
    /// # Errors
    ///
    /// Any error from [`Aggregator::combine`] or [`Aggregator::trend`].
    #[allow(clippy::cast_precision_loss)]
    pub fn summarize(&self, snapshot: &SensorSnapshot) -> Result<SensorSummary> {
        let aqi = self.combine(snapshot)?;
        let trend = self.trend(snapshot)?;
        let severity = Severity::classify(aqi as f64);
        tracing::debug!(
            id = snapshot.id,
            aqi,
            ?trend,
            ?severity,
            correction = ?self.correction,
            "summarized sensor"
        );

        Ok(SensorSummary {
            id: snapshot.id,
            name: snapshot.name.clone(),
            lat: snapshot.lat,
            lon: snapshot.lon,
            aqi,
            trend,
            severity,
        })
    }
}

/// NaN or infinite means come from non-finite humidity and must not be rounded
fn ensure_finite(sensor: &str, mean: f64) -> Result<f64> {
    if mean.is_finite() {
        Ok(mean)
    } else {
        Err(AqiError::InvalidData(format!("{sensor} mean AQI is {mean}")))
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[AqiValue]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|v| v.value()).sum::<f64>() / values.len() as f64)
}

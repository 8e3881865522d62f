//! Status-bar report over all configured sensors
//!
//! Rendered in the xbar/SwiftBar plugin format: the first line is shown in the
//! menu bar, everything after `---` goes in the dropdown, and `|href=` makes a
//! line clickable.

use crate::aggregate::{Aggregator, SensorSummary};
use crate::aqi::round_aqi;
use crate::config::Config;
use crate::severity::Severity;
use crate::snapshot::SnapshotSource;

/// Shown instead of a report when no sensors are configured
pub const NO_SENSORS_MESSAGE: &str = "add PurpleAir sensor IDs";

/// Link to a sensor on the PurpleAir map, with the AQI layer selected
#[must_use]
pub fn map_url(id: u32, lat: f64, lon: f64) -> String {
    format!("https://www.purpleair.com/map?opt=1/i/mAQI/a10/cC0&select={id}#11/{lat}/{lon}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Number of sensors that were asked for
    pub configured: usize,
    /// Sensors that could be summarized, in configured order
    pub sensors: Vec<SensorSummary>,
}

impl Report {
    /// Read and summarize every configured sensor in order.
    ///
    /// A sensor that cannot be read or aggregated is left out of the report.
    pub fn build(source: &mut impl SnapshotSource, config: &Config) -> Self {
        let aggregator = Aggregator::new(config.correction());
        let sensors = config
            .sensor_ids
            .iter()
            .filter_map(|&id| {
                match source
                    .snapshot(id)
                    .and_then(|snapshot| aggregator.summarize(&snapshot))
                {
                    Ok(summary) => Some(summary),
                    Err(e) => {
                        tracing::warn!(sensor = id, error = %e, "dropping sensor from report");
                        None
                    }
                }
            })
            .collect();

        Self {
            configured: config.sensor_ids.len(),
            sensors,
        }
    }

    /// Rounded mean AQI over the reported sensors
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> Option<i64> {
        if self.sensors.is_empty() {
            return None;
        }
        let total: i64 = self.sensors.iter().map(|s| s.aqi).sum();
        Some(round_aqi(total as f64 / self.sensors.len() as f64))
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn render(&self) -> String {
        if self.configured == 0 {
            return NO_SENSORS_MESSAGE.to_string();
        }

        let header = match self.mean() {
            Some(mean) => format!("AQI: {mean} {}", Severity::classify(mean as f64).icon()),
            None => format!("AQI: ? {}", Severity::Unknown.icon()),
        };

        let mut lines = vec![header, "---".to_string()];
        lines.extend(self.sensors.iter().map(render_sensor));
        lines.join("\n")
    }
}

fn render_sensor(sensor: &SensorSummary) -> String {
    format!(
        "{}: {}{} ({})|href={}",
        sensor.name,
        sensor.aqi,
        sensor.trend.glyph(),
        sensor.severity.description(),
        map_url(sensor.id, sensor.lat, sensor.lon)
    )
}

//! Sensor snapshots and the PurpleAir JSON document they are read from
//!
//! A PurpleAir `/json?show=<id>` response has one entry in `results` per
//! laser counter channel. Each entry carries a `Stats` field that is itself a
//! JSON-encoded string of PM2.5 averages:
//!
//! - `v`: current reading
//! - `v1`: 10 minute average
//! - `v2`: 30 minute average
//! - `v3`: 1 hour average

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AqiError, Result};

/// PM2.5 readings for one channel, most recent first
pub type Series = Vec<f64>;

/// Latest readings of one sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// PurpleAir sensor id
    pub id: u32,
    /// Display name
    pub name: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Relative humidity in % as reported by the sensor, if any channel has it
    pub humidity: Option<f64>,
    /// One series per channel; the first is the primary channel
    pub series: Vec<Series>,
}

#[derive(Debug, Deserialize)]
struct PurpleAirResponse {
    results: Option<Vec<ChannelRecord>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ChannelRecord {
    #[serde(rename = "ID")]
    id: Option<u32>,
    label: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(rename = "humidity")]
    humidity: Option<Numeric>,
    stats: Option<String>,
}

/// PurpleAir reports some numbers as strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// Finite value only: `"nan"` and `"inf"` parse as floats but are not readings
    fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        };
        value.filter(|value: &f64| value.is_finite())
    }
}

#[derive(Debug, Deserialize)]
struct ChannelStats {
    v: Option<f64>,
    v1: Option<f64>,
    v2: Option<f64>,
    v3: Option<f64>,
}

impl ChannelStats {
    fn into_series(self) -> Series {
        [self.v, self.v1, self.v2, self.v3]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl SensorSnapshot {
    /// Parse a PurpleAir `/json?show=<id>` response body.
    ///
    /// Identity and location come from the first channel, humidity from the
    /// first channel that reports a usable value. A document without humidity
    /// is still a valid snapshot; only the EPA correction needs it.
    ///
    /// # Errors
    ///
    /// * `AqiError::InvalidJson` - The body or a channel's `Stats` is not valid JSON
    /// * `AqiError::MissingField` - A required field is absent
    pub fn from_purpleair_json(body: &str) -> Result<Self> {
        let response: PurpleAirResponse = serde_json::from_str(body)?;
        let channels = response
            .results
            .filter(|results| !results.is_empty())
            .ok_or_else(|| AqiError::missing_field("results"))?;

        let series = channels
            .iter()
            .map(|channel| -> Result<Series> {
                let stats = channel
                    .stats
                    .as_deref()
                    .ok_or_else(|| AqiError::missing_field("Stats"))?;
                let stats: ChannelStats = serde_json::from_str(stats)?;
                Ok(stats.into_series())
            })
            .collect::<Result<Vec<_>>>()?;

        let humidity = channels
            .iter()
            .find_map(|channel| channel.humidity.as_ref().and_then(Numeric::as_f64));

        let primary = &channels[0];
        let snapshot = Self {
            id: primary.id.ok_or_else(|| AqiError::missing_field("ID"))?,
            name: primary
                .label
                .clone()
                .ok_or_else(|| AqiError::missing_field("Label"))?,
            lat: primary.lat.ok_or_else(|| AqiError::missing_field("Lat"))?,
            lon: primary.lon.ok_or_else(|| AqiError::missing_field("Lon"))?,
            humidity,
            series,
        };

        tracing::debug!(
            id = snapshot.id,
            channels = snapshot.series.len(),
            humidity = ?snapshot.humidity,
            "parsed purpleair snapshot"
        );
        Ok(snapshot)
    }
}

/// A type that can supply the latest snapshot of a sensor.
///
/// Fetching over the network is left to implementors; the crate ships a
/// directory-backed source and an in-memory fake.
pub trait SnapshotSource {
    /// Get the latest snapshot for `sensor_id`.
    ///
    /// # Errors
    ///
    /// Any [`AqiError`] raised while locating or parsing the snapshot.
    fn snapshot(&mut self, sensor_id: u32) -> Result<SensorSnapshot>;
}

/// Reads `<dir>/<sensor_id>.json` PurpleAir documents, e.g. saved by a cron job
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the document for a sensor
    #[must_use]
    pub fn path_for(&self, sensor_id: u32) -> PathBuf {
        self.dir.join(format!("{sensor_id}.json"))
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SnapshotSource for DirectorySource {
    fn snapshot(&mut self, sensor_id: u32) -> Result<SensorSnapshot> {
        let path = self.path_for(sensor_id);
        tracing::debug!(path = %path.display(), "reading snapshot");
        let body = std::fs::read_to_string(&path)
            .map_err(|e| AqiError::Io(format!("{}: {e}", path.display())))?;
        SensorSnapshot::from_purpleair_json(&body)
    }
}

/// Fake snapshot source: serves the snapshots it was built with.
#[derive(Debug, Clone, Default)]
pub struct FakeSource {
    pub snapshots: HashMap<u32, SensorSnapshot>,
}

impl FakeSource {
    #[must_use]
    pub fn new(snapshots: impl IntoIterator<Item = SensorSnapshot>) -> Self {
        Self {
            snapshots: snapshots.into_iter().map(|s| (s.id, s)).collect(),
        }
    }
}

impl SnapshotSource for FakeSource {
    fn snapshot(&mut self, sensor_id: u32) -> Result<SensorSnapshot> {
        self.snapshots
            .get(&sensor_id)
            .cloned()
            .ok_or_else(|| AqiError::Io(format!("no snapshot for sensor {sensor_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn stats(values: &serde_json::Value) -> String {
        values.to_string()
    }

    fn two_channel_body() -> String {
        json!({
            "mapVersion": "0.18",
            "results": [
                {
                    "ID": 1234,
                    "Label": "Backyard",
                    "Lat": 37.7749,
                    "Lon": -122.4194,
                    "humidity": "42",
                    "Stats": stats(&json!({
                        "v": 10.5, "v1": 11.0, "v2": 12.25, "v3": 13.0,
                        "v4": 14.0, "pm": 10.5, "lastModified": 1_600_000_000_000_u64
                    })),
                },
                {
                    "ID": 1235,
                    "ParentID": 1234,
                    "Label": "Backyard B",
                    "Lat": 37.7749,
                    "Lon": -122.4194,
                    "Stats": stats(&json!({"v": 9.5, "v1": 10.0})),
                }
            ]
        })
        .to_string()
    }

    #[test]
    fn parses_purpleair_document() {
        let snapshot = SensorSnapshot::from_purpleair_json(&two_channel_body()).unwrap();
        assert_eq!(
            snapshot,
            SensorSnapshot {
                id: 1234,
                name: "Backyard".into(),
                lat: 37.7749,
                lon: -122.4194,
                humidity: Some(42.0),
                series: vec![vec![10.5, 11.0, 12.25, 13.0], vec![9.5, 10.0]],
            }
        );
    }

    #[test]
    fn humidity_from_later_channel_or_number() {
        let body = json!({
            "results": [
                {"ID": 1, "Label": "A", "Lat": 1.0, "Lon": 2.0, "Stats": stats(&json!({"v": 1.0}))},
                {"ID": 2, "humidity": 55.5, "Stats": stats(&json!({"v2": 3.0, "v": 2.0}))}
            ]
        })
        .to_string();
        let snapshot = SensorSnapshot::from_purpleair_json(&body).unwrap();
        assert_eq!(snapshot.humidity, Some(55.5));
        // Keys are taken in v, v1, v2, v3 order regardless of document order
        assert_eq!(snapshot.series, vec![vec![1.0], vec![2.0, 3.0]]);
    }

    #[rstest]
    #[case::absent(json!({}), None)]
    #[case::nan_text(json!({"humidity": "nan"}), None)]
    #[case::inf_text(json!({"humidity": "inf"}), None)]
    #[case::garbage(json!({"humidity": "n/a"}), None)]
    #[case::text(json!({"humidity": " 61 "}), Some(61.0))]
    #[case::number(json!({"humidity": 18.5}), Some(18.5))]
    fn humidity_cases(#[case] extra: serde_json::Value, #[case] expected: Option<f64>) {
        let mut channel = json!({
            "ID": 1, "Label": "Indoor", "Lat": 1.0, "Lon": 2.0,
            "Stats": stats(&json!({"v": 41.0}))
        });
        if let (Some(channel), Some(extra)) = (channel.as_object_mut(), extra.as_object()) {
            channel.extend(extra.clone());
        }
        let body = json!({ "results": [channel] }).to_string();

        let snapshot = SensorSnapshot::from_purpleair_json(&body).unwrap();
        assert_eq!(snapshot.humidity, expected);
        assert_eq!(snapshot.series, vec![vec![41.0]]);
    }

    #[test]
    fn missing_fields() {
        let no_results = json!({"results": []}).to_string();
        assert_eq!(
            SensorSnapshot::from_purpleair_json(&no_results),
            Err(AqiError::missing_field("results"))
        );

        let no_stats = json!({
            "results": [{"ID": 1, "Label": "A", "Lat": 1.0, "Lon": 2.0, "humidity": "10"}]
        })
        .to_string();
        assert_eq!(
            SensorSnapshot::from_purpleair_json(&no_stats),
            Err(AqiError::missing_field("Stats"))
        );

        let no_label = json!({
            "results": [{"ID": 1, "Lat": 1.0, "Lon": 2.0, "humidity": "10", "Stats": "{}"}]
        })
        .to_string();
        assert_eq!(
            SensorSnapshot::from_purpleair_json(&no_label),
            Err(AqiError::missing_field("Label"))
        );
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(
            SensorSnapshot::from_purpleair_json("<html>rate limited</html>"),
            Err(AqiError::InvalidJson(_))
        ));

        let bad_stats = json!({
            "results": [{"ID": 1, "Label": "A", "Lat": 1.0, "Lon": 2.0, "humidity": "10", "Stats": "{v:"}]
        })
        .to_string();
        assert!(matches!(
            SensorSnapshot::from_purpleair_json(&bad_stats),
            Err(AqiError::InvalidJson(_))
        ));
    }

    #[test]
    fn directory_source_reads_documents() {
        let dir = std::env::temp_dir().join(format!("purple-aqi-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("1234.json"), two_channel_body()).unwrap();

        let mut source = DirectorySource::new(&dir);
        assert_eq!(source.dir(), dir.as_path());
        let snapshot = source.snapshot(1234).unwrap();
        assert_eq!(snapshot.name, "Backyard");
        assert!(matches!(source.snapshot(99), Err(AqiError::Io(_))));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn fake_source_serves_snapshots() {
        let snapshot = SensorSnapshot::from_purpleair_json(&two_channel_body()).unwrap();
        let mut source = FakeSource::new([snapshot.clone()]);
        assert_eq!(source.snapshot(1234), Ok(snapshot));
        assert_eq!(
            source.snapshot(7),
            Err(AqiError::Io("no snapshot for sensor 7".into()))
        );
    }
}

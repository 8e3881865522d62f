//! Status Line Example for PurpleAir AQI
//!
//! This example parses a PurpleAir JSON document, shows the corrected and
//! uncorrected AQI side by side, and renders the status-bar report.
//!
//! Run with: cargo run --example status_line

use purple_aqi::{
    AqiError, Config, Correction, FakeSource, Report, SensorSnapshot, Severity, summarize, to_aqi,
};

const DOCUMENT: &str = r#"{
  "mapVersion": "0.18",
  "results": [
    {
      "ID": 1234,
      "Label": "Backyard",
      "Lat": 37.7749,
      "Lon": -122.4194,
      "humidity": "48",
      "Stats": "{\"v\":38.2,\"v1\":31.5,\"v2\":27.9,\"v3\":24.0,\"pm\":38.2}"
    },
    {
      "ID": 1235,
      "ParentID": 1234,
      "Label": "Backyard B",
      "Lat": 37.7749,
      "Lon": -122.4194,
      "Stats": "{\"v\":36.9,\"v1\":30.8,\"v2\":27.1,\"v3\":23.6,\"pm\":36.9}"
    }
  ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🌫️  PurpleAir AQI - Status Line Example\n");

    println!("📄 Example 1: Parsing a PurpleAir document");
    println!("==========================================");
    let snapshot = SensorSnapshot::from_purpleair_json(DOCUMENT)?;
    println!("Sensor: {} (#{})", snapshot.name, snapshot.id);
    match snapshot.humidity {
        Some(humidity) => println!("Humidity: {humidity}%"),
        None => println!("Humidity: not reported"),
    }
    for (channel, series) in snapshot.series.iter().enumerate() {
        println!("Channel {channel}: {series:?}");
    }

    println!();

    println!("💧 Example 2: Humidity correction");
    println!("=================================");
    for correction in [Correction::None, Correction::Epa] {
        let summary = summarize(&snapshot, correction)?;
        println!(
            "{correction:?}: AQI {}{} ({})",
            summary.aqi,
            summary.trend.glyph(),
            summary.severity.title()
        );
    }
    let raw = snapshot.series[0][0];
    if let Some(humidity) = snapshot.humidity {
        println!(
            "Latest primary reading {raw} µg/m³ at {humidity}% -> AQI {}",
            to_aqi(raw, humidity)
        );
    }

    println!();

    println!("📊 Example 3: Status-bar report");
    println!("===============================");
    let mut source = FakeSource::new([snapshot.clone()]);
    let config = Config {
        sensor_ids: vec![1234, 9999],
        ..Config::default()
    };
    println!("{}", Report::build(&mut source, &config).render());

    println!();

    println!("⚠️  Example 4: Error handling");
    println!("=============================");
    let empty = SensorSnapshot {
        series: Vec::new(),
        ..snapshot
    };
    match summarize(&empty, Correction::Epa) {
        Ok(summary) => println!("Unexpected summary: {summary:?}"),
        Err(AqiError::EmptySeries(reason)) => println!("❌ Skipped: {reason}"),
        Err(e) => println!("❌ Failed: {e}"),
    }
    println!(
        "A negative value classifies as {:?}",
        Severity::classify(-1.0)
    );

    Ok(())
}

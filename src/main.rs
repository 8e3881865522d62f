//! Status-bar plugin: prints the AQI summary of the configured PurpleAir sensors.
//!
//! Usage: `purple-aqi [config.json]`, with `PURPLE_AQI_*` environment
//! variables overriding the file. Logs go to stderr, `RUST_LOG` controls them.

use std::process::ExitCode;

use purple_aqi::{Config, DirectorySource, Report};
use tracing_subscriber::EnvFilter;

fn load_config() -> purple_aqi::Result<Config> {
    match std::env::args_os().nth(1) {
        Some(path) => Config::from_path(path)?.with_env(|key| std::env::var(key).ok()),
        None => Config::from_env(),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("could not load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        sensors = config.sensor_ids.len(),
        correction = ?config.correction(),
        data_dir = %config.data_dir.display(),
        "building report"
    );

    let mut source = DirectorySource::new(config.data_dir.clone());
    let report = Report::build(&mut source, &config);
    println!("{}", report.render());

    ExitCode::SUCCESS
}

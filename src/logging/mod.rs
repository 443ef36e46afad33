// Logging module for structured logging using the tracing crate

use serde::{Deserialize, Serialize};
use std::error::Error;
use tracing_subscriber::EnvFilter;

/// Log line format for the diagnostic stream (stderr)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line logs
    #[default]
    Text,
    /// One JSON object per line, for log aggregation
    Json,
}

/// Level filter for a `-v` count: 0 → warn, 1 → info, 2 → debug, 3+ → trace
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the tracing subscriber for structured logging
///
/// Logs go to stderr so the report on stdout stays machine-readable.
/// `RUST_LOG` takes precedence over the verbosity-derived level.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
///
/// # Examples
///
/// ```
/// use hw_pragma_scan::logging::{init_subscriber, LogFormat};
///
/// init_subscriber(LogFormat::Text, 1).expect("Failed to initialize logging");
/// tracing::info!("scanner started");
/// ```
pub fn init_subscriber(format: LogFormat, verbosity: u8) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Text => builder.try_init().map_err(|e| e as Box<dyn Error>)?,
        LogFormat::Json => builder.json().try_init().map_err(|e| e as Box<dyn Error>)?,
    }

    Ok(())
}

//! Structured logging infrastructure for PilotOps.
//!
//! This module provides centralized logging initialization with support
//! for structured JSON output and environment-based configuration.
//! Output goes to stderr so it never interleaves with console prompts.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Initialize the logging system with human-readable output.
///
/// Log level can be configured via the `RUST_LOG` environment variable.
/// If not set, defaults to `default_level`.
///
/// # Example
/// ```no_run
/// use pilotops_core::logging;
///
/// logging::init("info");
/// tracing::info!("Schedule loaded");
/// ```
pub fn init(default_level: &str) {
    tracing_subscriber::registry()
        .with(filter(default_level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}

/// Initialize the logging system with JSON output.
///
/// This format is suitable for log aggregation systems and structured log analysis.
/// Log level can be configured via the `RUST_LOG` environment variable.
///
/// # Example
/// ```no_run
/// use pilotops_core::logging;
///
/// logging::init_json("info");
/// tracing::info!(pilot_id = "P1", "Pilot checked in");
/// ```
pub fn init_json(default_level: &str) {
    tracing_subscriber::registry()
        .with(filter(default_level))
        .with(
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}

/// Initialize logging from the `[logging]` configuration section.
pub fn init_from_config(config: &LoggingConfig) {
    match config.format {
        LogFormat::Pretty => init(&config.level),
        LogFormat::Json => init_json(&config.level),
    }
}

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

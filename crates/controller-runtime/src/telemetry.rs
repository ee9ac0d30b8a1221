//! Logging setup.
//!
//! `RUST_LOG` wins when set; otherwise the configured level is used.

use crate::config::LoggingConfig;
use crate::error::RuntimeError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// Fails if a subscriber is already installed or the filter is invalid.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), RuntimeError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| RuntimeError::Telemetry(e.to_string()))?;

    if config.json {
        // JSON output for containers/production
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| RuntimeError::Telemetry(e.to_string()))?;
    } else {
        // Pretty output for development
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| RuntimeError::Telemetry(e.to_string()))?;
    }

    tracing::info!(level = %config.level, json = config.json, "Logging initialized");
    Ok(())
}

//! Diagnostic logging
//!
//! Structured logging through `tracing`. Everything goes to stderr so that
//! cleaned traces on stdout stay pipeable.

use crate::config::{LogFormat, LoggingConfig};
use crate::utils::error::{AppError, AppResult};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a full filter directive, e.g. `tracesift=trace`
pub const LOG_ENV: &str = "TRACESIFT_LOG";

/// Initialize the global subscriber.
///
/// Priority order (highest to lowest):
/// 1. `TRACESIFT_LOG` environment variable
/// 2. `--debug` flag
/// 3. Configuration file
pub fn init_logging(config: &LoggingConfig, debug: bool, color: bool) -> AppResult<()> {
    let filter = build_env_filter(config, debug)?;
    let base_subscriber = Registry::default().with(filter);

    let result = match config.format {
        LogFormat::Json => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| AppError::System(format!("Failed to initialize logging: {}", e)))
}

fn build_env_filter(config: &LoggingConfig, debug: bool) -> AppResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }

    let level = if debug { "debug" } else { config.level.as_str() };

    EnvFilter::try_new(level)
        .map_err(|e| AppError::Config(format!("Invalid log level '{}': {}", level, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_flag_overrides_config_level() {
        if std::env::var(LOG_ENV).is_ok() {
            return;
        }
        let config = LoggingConfig::default();
        let filter = build_env_filter(&config, true).unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_config_level_used_without_debug() {
        if std::env::var(LOG_ENV).is_ok() {
            return;
        }
        let config = LoggingConfig {
            level: "error".to_string(),
            ..LoggingConfig::default()
        };
        let filter = build_env_filter(&config, false).unwrap();
        assert_eq!(filter.to_string(), "error");
    }
}

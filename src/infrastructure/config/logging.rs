//! Logging configuration and initialization.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Output formats the subscriber understands.
pub const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Check the format is one the subscriber supports.
    pub fn validate(&self) -> Result<()> {
        if !LOG_FORMATS.contains(&self.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected one of: {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }
        if self.level.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "logging.level",
            }
            .into());
        }
        Ok(())
    }

    /// Filter directive after `-v` flags: one raises to `debug`, two or more to `trace`.
    #[must_use]
    pub fn effective_level(&self, verbosity: u8) -> &str {
        match verbosity {
            0 => &self.level,
            1 => "debug",
            _ => "trace",
        }
    }

    /// Initialize the tracing subscriber. `RUST_LOG` wins over the configured level.
    ///
    /// Logs go to stderr so command output on stdout stays parseable.
    pub fn init(&self, verbosity: u8) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.effective_level(verbosity)));

        match self.format.as_str() {
            "json" => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            _ => {
                fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        let config = LoggingConfig::default();
        assert_eq!(config.effective_level(0), "warn");
        assert_eq!(config.effective_level(1), "debug");
        assert_eq!(config.effective_level(3), "trace");
    }

    #[test]
    fn unknown_format_is_rejected() {
        let config = LoggingConfig {
            level: "info".into(),
            format: "xml".into(),
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.format"));
    }

    #[test]
    fn blank_level_is_missing() {
        let config = LoggingConfig {
            level: " ".into(),
            format: "json".into(),
        };
        assert!(config.validate().is_err());
    }
}

//! Application configuration loading and validation.
//!
//! Provides the [`Config`] struct that aggregates all settings. Configuration
//! is read from a TOML file; `APPRAISAL_DATABASE` overrides the database path.
//!
//! # Example
//!
//! ```no_run
//! use appraisal::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging(0);
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::database::{DatabaseConfig, DATABASE_ENV};
use super::logging::LoggingConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// SQLite settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse and validate configuration from TOML content.
    ///
    /// Missing sections fall back to defaults. Environment overrides are not
    /// applied here.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config = Self::parse_toml(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        debug!(path = %path.display(), "No config file; using defaults");
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    /// Apply `APPRAISAL_DATABASE` when it is set and non-empty.
    pub fn apply_env(&mut self) {
        if let Some(path) = std::env::var_os(DATABASE_ENV).filter(|v| !v.is_empty()) {
            self.database.path = PathBuf::from(path);
        }
    }

    /// Render as TOML, as written by `appraisal init`.
    #[allow(clippy::result_large_err)]
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self).map_err(ConfigError::Render)?)
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self, verbosity: u8) {
        self.logging.init(verbosity);
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        self.database.validate()?;
        self.logging.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.database.pool_size, 5);
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
[database]
path = "/var/lib/appraisal/reviews.db"
pool_size = 2

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();
        assert_eq!(
            config.database.path,
            PathBuf::from("/var/lib/appraisal/reviews.db")
        );
        assert_eq!(config.database.pool_size, 2);
        assert_eq!(config.database.busy_timeout_ms, 5000);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::parse_toml("[database\npath = 1").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let err = Config::parse_toml("[database]\npool_size = 0\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "database.pool_size",
                ..
            })
        ));
    }

    #[test]
    fn rendered_config_parses_back() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("[database]"));
        assert_eq!(Config::parse_toml(&text).unwrap(), config);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"info\"\n").unwrap();

        let config = Config::parse_toml(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(Config::load(dir.path().join("absent.toml")).is_err());
    }
}

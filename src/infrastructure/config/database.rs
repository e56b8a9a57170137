//! Database location and pool settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths;
use crate::adapter::outbound::sqlite::{self, DbPool, PoolOptions};
use crate::error::{ConfigError, Result};

/// Environment variable that overrides [`DatabaseConfig::path`].
pub const DATABASE_ENV: &str = "APPRAISAL_DATABASE";

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file, or `:memory:` for a throwaway database.
    pub path: PathBuf,
    /// Upper bound on pooled connections.
    pub pool_size: u32,
    /// Milliseconds a writer waits on a locked database.
    pub busy_timeout_ms: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let options = PoolOptions::default();
        Self {
            path: paths::default_database(),
            pool_size: options.max_size,
            busy_timeout_ms: options.busy_timeout_ms,
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.path",
            }
            .into());
        }
        if self.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.pool_size",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.path.as_os_str() == sqlite::MEMORY_DATABASE_URL
    }

    /// Connection URL for the configured path.
    #[must_use]
    pub fn url(&self) -> String {
        if self.is_memory() {
            sqlite::MEMORY_DATABASE_URL.to_string()
        } else {
            sqlite::sqlite_database_url(&self.path)
        }
    }

    #[must_use]
    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_size: self.pool_size,
            busy_timeout_ms: self.busy_timeout_ms,
        }
    }

    /// Open a migrated pool, creating the parent directory of a file database.
    pub fn open(&self) -> Result<DbPool> {
        if !self.is_memory() {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
        }
        sqlite::open(&self.url(), self.pool_options())
    }
}

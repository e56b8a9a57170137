//! Path utilities for appraisal.
//!
//! All data lives under `~/.appraisal/`:
//! - `~/.appraisal/config.toml` - main configuration
//! - `~/.appraisal/appraisal.db` - evaluation database

use std::path::PathBuf;

/// Returns the appraisal home directory (`~/.appraisal/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".appraisal")
}

/// Returns the default config file path (`~/.appraisal/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default database path (`~/.appraisal/appraisal.db`).
pub fn default_database() -> PathBuf {
    home_dir().join("appraisal.db")
}

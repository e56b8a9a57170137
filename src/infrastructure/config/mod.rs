//! Configuration loading.
//!
//! - [`settings`] - the top-level [`Config`] read from `config.toml`
//! - [`database`] - SQLite location and pool sizing
//! - [`logging`] - tracing subscriber setup
//! - [`paths`] - the `~/.appraisal/` layout

pub mod database;
pub mod logging;
pub mod paths;
pub mod settings;

pub use database::DatabaseConfig;
pub use logging::LoggingConfig;
pub use settings::Config;

//! Handlers for `init`, `migrate`, and `config show`.

use std::fs;
use std::path::Path;

use serde_json::json;

use super::output;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Execute `init`: write the configuration file and migrate the database.
///
/// The file gets default values; `--db` and `APPRAISAL_DATABASE` pick the
/// database migrated by this run without being persisted.
pub fn init(config_path: &Path, config: &Config, force: bool) -> Result<()> {
    let wrote_config = if config_path.exists() && !force {
        false
    } else {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(config_path, Config::default().to_toml()?)?;
        true
    };
    config.database.open()?;

    if output::is_json() {
        output::json_output(json!({
            "command": "init",
            "config": config_path.display().to_string(),
            "config_written": wrote_config,
            "database": config.database.path.display().to_string(),
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    if wrote_config {
        output::success("Wrote configuration");
    } else {
        output::note("Kept existing configuration (use --force to overwrite)");
    }
    output::field("Config", config_path.display());
    output::success("Database ready");
    output::field("Database", config.database.path.display());
    output::hint("create a template with `appraisal template create <name>`");
    Ok(())
}

/// Execute `migrate`.
pub fn migrate(config: &Config) -> Result<()> {
    config.database.open()?;

    if output::is_json() {
        output::json_output(json!({
            "command": "migrate",
            "database": config.database.path.display().to_string(),
            "status": "ok",
        }));
        return Ok(());
    }

    output::success("Database schema is up to date");
    output::field("Database", config.database.path.display());
    Ok(())
}

/// Execute `config show`.
pub fn show(config_path: &Path, config: &Config) -> Result<()> {
    if output::is_json() {
        let value = serde_json::to_value(config)?;
        output::json_output(json!({
            "command": "config.show",
            "path": config_path.display().to_string(),
            "exists": config_path.exists(),
            "config": value,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("File", config_path.display());
    if !config_path.exists() {
        output::note("(file not found; showing defaults)");
    }

    output::section("Database");
    output::field("Path", config.database.path.display());
    output::field("Pool size", config.database.pool_size);
    output::field("Busy timeout", format!("{}ms", config.database.busy_timeout_ms));

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_does_not_persist_database_override() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.database.path = dir.path().join("override.db");

        init(&config_path, &config, false).unwrap();

        assert!(config.database.path.exists());
        let written = fs::read_to_string(&config_path).unwrap();
        assert!(!written.contains("override.db"));
        assert_eq!(Config::parse_toml(&written).unwrap(), Config::default());
    }
}

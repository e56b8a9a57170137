//! Command-line adapter: argument parsing, handlers, and terminal output.
//!
//! Handlers are generic over the store ports so they run against any
//! backend; the binary wires them to [`SqliteStore`].

pub mod command;
pub mod diagnostic;
pub mod evaluation;
pub mod feedback;
pub mod goal;
pub mod output;
pub mod prompt;
pub mod setup;
pub mod template;
pub mod user;

use std::path::Path;

use tracing::debug;

use self::command::{Cli, Commands, ConfigCommand};
use self::output::OutputConfig;
use crate::adapter::outbound::sqlite::SqliteStore;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Apply the global output flags.
pub fn configure_output(cli: &Cli) {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.color));
}

/// Effective configuration: the file (or defaults when absent), then
/// `APPRAISAL_DATABASE`, then `--db`.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(db) = &cli.db {
        config.database.path = db.clone();
    }
    Ok(config)
}

fn open_store(config: &Config) -> Result<SqliteStore> {
    debug!(database = %config.database.path.display(), "Opening store");
    Ok(SqliteStore::new(config.database.open()?))
}

/// Run one parsed command.
pub async fn run(command: Commands, config: &Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Init(args) => setup::init(config_path, config, args.force),
        Commands::Migrate => setup::migrate(config),
        Commands::Config(ConfigCommand::Show) => setup::show(config_path, config),
        Commands::User(cmd) => user::execute(&open_store(config)?, cmd).await,
        Commands::Template(cmd) => template::execute(&open_store(config)?, cmd).await,
        Commands::Section(cmd) => template::execute_section(&open_store(config)?, cmd).await,
        Commands::Question(cmd) => template::execute_question(&open_store(config)?, cmd).await,
        Commands::Evaluation(cmd) => evaluation::execute(&open_store(config)?, cmd).await,
        Commands::Response(cmd) => {
            evaluation::execute_response(&open_store(config)?, cmd).await
        }
        Commands::Goal(cmd) => goal::execute(&open_store(config)?, cmd).await,
        Commands::Feedback(cmd) => feedback::execute(&open_store(config)?, cmd).await,
    }
}

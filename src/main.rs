use appraisal::adapter::inbound::cli::{self, command::Cli, diagnostic};
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli::configure_output(&cli);

    let config = match cli::load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            diagnostic::report(&e, &cli.config);
            std::process::exit(1);
        }
    };

    config.init_logging(cli.verbose);
    debug!(database = %config.database.path.display(), "appraisal starting");

    if let Err(e) = cli::run(cli.command, &config, &cli.config).await {
        debug!(error = %e, "Command failed");
        diagnostic::report(&e, &cli.config);
        std::process::exit(1);
    }
}

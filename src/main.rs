//! Portfolio tracker CLI application.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use folio_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI flags win over the config file; the file may not exist yet
    // (the login command creates it).
    let file_config = folio_config::load_config(&cli.config).ok();
    let log_level = match cli.log_level {
        Some(level) => level.as_str().to_string(),
        None => file_config
            .as_ref()
            .map(|c| c.logging.level.clone())
            .unwrap_or_else(|| "info".to_string()),
    };
    let json_logs = cli.json_logs
        || file_config
            .as_ref()
            .is_some_and(|c| c.logging.format == "json");
    setup_logging(&log_level, json_logs);

    match cli.command {
        Commands::Login(args) => cli::commands::login::run(args, &cli.config).await,
        Commands::Portfolios(args) => cli::commands::portfolios::run(args, &cli.config).await,
        Commands::Fetch => cli::commands::fetch::run(&cli.config).await,
        Commands::Watch => cli::commands::watch::run(&cli.config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}

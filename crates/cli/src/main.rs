//! `shelflife` binary entry point.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use shelflife_cli::{AppState, Cli, run};
use shelflife_infra::{AppConfig, ConsoleNotifier, SqliteInventoryStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = cli.apply_overrides(AppConfig::from_env());
    let log_format = match &config {
        Ok(config) => config.log_format,
        Err(_) => cli.log_format.unwrap_or_default(),
    };
    shelflife_observability::init(log_format);

    let config = match config {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            return Ok(ExitCode::FAILURE);
        }
    };
    config.log_warnings();

    let store = SqliteInventoryStore::connect(&config.database_url)
        .await
        .context("failed to open the inventory database")?;

    let state = AppState::new(
        Arc::new(store),
        Arc::new(ConsoleNotifier),
        config.window,
        config.alert_source,
    );

    let today = chrono::Local::now().date_naive();
    match run(cli.command, &state, today).await {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(message) => {
            eprintln!("{message}");
            Ok(ExitCode::FAILURE)
        }
    }
}

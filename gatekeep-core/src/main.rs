use anyhow::Result;
use clap::{Parser, Subcommand};
use gatekeep_core::{config::Config, migration, server, telemetry};
use tracing::info;

/// Gatekeep identity service
#[derive(Parser)]
#[command(name = "gatekeep", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply migrations, then serve HTTP (default)
    Serve,
    /// Apply migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let prometheus_handle = telemetry::init(&config.telemetry)?;

    migration::run_migrations(&config).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            info!("Migrations complete, exiting");
            Ok(())
        }
        Command::Serve => {
            info!("Starting Gatekeep Core Service");
            server::run(config, prometheus_handle).await
        }
    }
}

//! Shop API CLI - Database migration tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! shopapi-cli migrate up
//!
//! # Show applied and pending migrations
//! shopapi-cli migrate status
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shopapi-cli")]
#[command(version, about = "Shop API CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// List migrations and whether each has been applied
    Status,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::migrate::MigrationError> {
    match cli.command {
        Commands::Migrate { action } => match action {
            MigrateAction::Up => commands::migrate::up().await?,
            MigrateAction::Status => commands::migrate::status().await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_migrate_up() {
        let cli = Cli::try_parse_from(["shopapi-cli", "migrate", "up"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Migrate {
                action: MigrateAction::Up
            })
        ));
    }
}

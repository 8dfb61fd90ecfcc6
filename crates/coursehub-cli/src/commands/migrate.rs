//! Database migration management commands.

use clap::{Args, Subcommand};

use coursehub_core::config::{AppConfig, DatabaseBackend};
use coursehub_core::error::AppError;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    if config.database.backend == DatabaseBackend::Memory {
        return Err(AppError::configuration(
            "Migrations need database.backend = \"postgres\"",
        ));
    }

    match &args.command {
        MigrateCommand::Run => {
            let pool = super::create_db_pool(config).await?;
            println!("Running database migrations...");
            pool.migrate().await?;
            pool.close().await;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}

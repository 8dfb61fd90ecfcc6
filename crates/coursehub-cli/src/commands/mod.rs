//! CLI command definitions and dispatch.

pub mod config;
pub mod folder;
pub mod migrate;
pub mod token;

use clap::{Parser, Subcommand};

use coursehub_core::config::AppConfig;
use coursehub_core::error::AppError;
use coursehub_database::DatabasePool;

use crate::output::OutputFormat;

/// CourseHub course materials service
#[derive(Debug, Parser)]
#[command(name = "coursehub", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file (extension optional)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded from `config/{env}`
    #[arg(short, long, env = "COURSEHUB_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Bearer token helpers
    Token(token::TokenArgs),
    /// Materials folder inspection
    Folder(folder::FolderArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.load_config()?).await,
            Commands::Token(args) => token::execute(args, &self.load_config()?, self.format),
            Commands::Folder(args) => {
                folder::execute(args, &self.load_config()?, self.format).await
            }
            Commands::Config(args) => config::execute(args, self, self.format),
        }
    }

    /// Load configuration from the selected file and overlay
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load(&self.config, &self.env)
    }
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

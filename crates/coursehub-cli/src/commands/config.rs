//! Configuration inspection commands.

use clap::{Args, Subcommand};

use coursehub_core::config::AppConfig;
use coursehub_core::error::AppError;

use super::Cli;
use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the merged configuration with secrets masked
    Show,
    /// Validate the configuration
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, cli: &Cli, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = redacted(cli.load_config()?);
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => {
                    let value = serde_json::to_value(&config)?;
                    print_section("", &value);
                }
            }
        }
        ConfigCommand::Validate => match cli.load_config() {
            Ok(config) => {
                output::print_success(&format!("Configuration '{}' is valid", cli.config));
                output::print_kv("Server", &config.server.bind_addr());
                output::print_kv("Database", &format!("{:?}", config.database.backend));
                output::print_kv("Storage", &config.storage.provider);
                output::print_kv("Bucket", &config.storage.bucket);
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}

/// Replace every secret with a placeholder.
fn redacted(mut config: AppConfig) -> AppConfig {
    const MASK: &str = "****";
    config.database.url = config.database.redacted_url();
    config.auth.jwt_secret = MASK.to_string();
    config.storage.signing_secret = MASK.to_string();
    if !config.storage.s3.secret_key.is_empty() {
        config.storage.s3.secret_key = MASK.to_string();
    }
    config
}

fn print_section(prefix: &str, value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, inner) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                print_section(&path, inner);
            }
        }
        other => output::print_kv(prefix, &other.to_string()),
    }
}

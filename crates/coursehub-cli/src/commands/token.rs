//! Bearer token helpers for local testing and scripted clients.

use clap::{Args, Subcommand};
use serde::Serialize;

use coursehub_auth::JwtEncoder;
use coursehub_core::config::AppConfig;
use coursehub_core::error::AppError;
use coursehub_entity::user::UserRole;

use crate::output::{self, OutputFormat};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a signed token for a user
    Issue {
        /// User ID placed in `sub`
        #[arg(short, long)]
        user_id: i64,
        /// TEACHER or STUDENT
        #[arg(short, long)]
        role: String,
        /// Display name
        #[arg(short, long, default_value = "")]
        name: String,
    },
}

#[derive(Debug, Serialize)]
struct IssuedToken {
    token: String,
    expires_at: String,
}

/// Execute token commands
pub fn execute(args: &TokenArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue {
            user_id,
            role,
            name,
        } => {
            let role: UserRole = role.parse()?;
            let encoder = JwtEncoder::new(&config.auth);
            let (token, expires_at) = encoder.issue(*user_id, role, name)?;

            match format {
                OutputFormat::Json => output::print_json(&IssuedToken {
                    token,
                    expires_at: expires_at.to_rfc3339(),
                }),
                OutputFormat::Table => {
                    output::print_kv("User", &user_id.to_string());
                    output::print_kv("Role", role.as_str());
                    output::print_kv("Expires", &expires_at.to_rfc3339());
                    println!();
                    println!("{token}");
                }
            }
        }
    }

    Ok(())
}

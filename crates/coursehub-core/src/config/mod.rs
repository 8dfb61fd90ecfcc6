//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod materials;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseBackend, DatabaseConfig};
pub use self::logging::LoggingConfig;
pub use self::materials::MaterialsConfig;
pub use self::storage::{LocalStorageConfig, S3StorageConfig, StorageConfig};

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "COURSEHUB";

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration files
/// (base file + environment overlay + `COURSEHUB__*` variables).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Relational store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Blob store settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Token verification settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Materials tree settings.
    #[serde(default)]
    pub materials: MaterialsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a base file and an optional environment overlay.
    ///
    /// `path` is passed to [`config::File::with_name`], so the extension may
    /// be omitted. The overlay `config/{env}` is optional. Environment
    /// variables such as `COURSEHUB__SERVER__PORT=9000` win over both.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject combinations that cannot work at runtime.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.database.backend == DatabaseBackend::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required when database.backend = \"postgres\"",
            ));
        }
        if self.storage.signed_url_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "storage.signed_url_ttl_seconds must be greater than zero",
            ));
        }
        if self.materials.max_tree_depth == 0 {
            return Err(AppError::configuration(
                "materials.max_tree_depth must be greater than zero",
            ));
        }
        Ok(())
    }
}

//! PostgreSQL pool backing the course stores.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use coursehub_core::config::{DatabaseBackend, DatabaseConfig};
use coursehub_core::error::{AppError, ErrorKind};
use coursehub_core::result::AppResult;

use crate::Repositories;
use crate::migration::run_migrations;

/// Pool shared by the server and the CLI when `database.backend = "postgres"`.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool described by `config`.
    ///
    /// The memory backend has nothing to connect to and is rejected.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        if config.backend != DatabaseBackend::Postgres {
            return Err(AppError::configuration(
                "database.backend = \"memory\" has no PostgreSQL pool",
            ));
        }

        info!(
            url = %config.redacted_url(),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to connect to PostgreSQL", e)
            })?;

        Ok(Self { pool })
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> AppResult<()> {
        run_migrations(&self.pool).await
    }

    /// Course, folder, file, assignment and submission stores over this pool.
    pub fn repositories(&self) -> Repositories {
        Repositories::postgres(self.pool.clone())
    }

    /// Whether a round trip to the server succeeds.
    pub async fn is_reachable(&self) -> bool {
        match sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Database ping failed");
                false
            }
        }
    }

    /// Close every connection; later queries fail.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

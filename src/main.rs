//! CourseHub server: course materials, submissions and signed downloads.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use coursehub_api::{AppState, run_server};
use coursehub_core::config::{AppConfig, DatabaseBackend};
use coursehub_core::error::AppError;
use coursehub_database::{DatabasePool, MemoryDatabase, Repositories};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from file, environment overlay and variables
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("COURSEHUB_CONFIG").unwrap_or_else(|_| "config/default".to_string());
    let env = std::env::var("COURSEHUB_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting CourseHub");

    // ── Step 1: Relational store ─────────────────────────────────
    let (repos, db_pool) = match config.database.backend {
        DatabaseBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            if config.database.run_migrations {
                pool.migrate().await?;
            }
            (pool.repositories(), Some(pool))
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using the in-memory database; all data is lost on restart");
            (Repositories::memory(Arc::new(MemoryDatabase::new())), None)
        }
    };

    // ── Step 2: Blob store ───────────────────────────────────────
    let storage = coursehub_storage::build_blob_store(&config.storage, &config.server).await?;

    // ── Step 3: Services and HTTP server ─────────────────────────
    let pool_handle = db_pool.clone();
    let state = AppState::new(config, repos, storage, db_pool);
    let result = run_server(state).await;

    if let Some(pool) = pool_handle {
        pool.close().await;
    }
    result
}

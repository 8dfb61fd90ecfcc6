//! Health check handler.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = match &state.db_pool {
        None => "memory",
        Some(pool) => {
            if pool.is_reachable().await {
                "connected"
            } else {
                "unavailable"
            }
        }
    };

    let storage_available = match state.storage.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            false
        }
    };

    let status = if database != "unavailable" && storage_available {
        "ok"
    } else {
        "degraded"
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        storage_provider: state.storage.provider_type().to_string(),
        storage_available,
        timestamp: Utc::now(),
    }))
}

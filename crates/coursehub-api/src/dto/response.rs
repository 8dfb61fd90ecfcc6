//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` when every dependency answered, `"degraded"` otherwise.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `"connected"`, `"unavailable"` or `"memory"`.
    pub database: String,
    /// Blob store provider type.
    pub storage_provider: String,
    /// Whether the blob store answered.
    pub storage_available: bool,
    /// Server time.
    pub timestamp: DateTime<Utc>,
}

/// Acknowledgement for a deleted material file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedFileResponse {
    /// ID of the removed record.
    pub file_id: i64,
    /// Storage path that was removed.
    pub storage_path: String,
}

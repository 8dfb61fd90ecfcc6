//! File record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Metadata binding a filename inside a folder to a blob path.
///
/// At most one live record exists per `(folder_id, filename)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct FileRecord {
    /// Unique file identifier.
    pub id: i64,
    /// Folder holding this file.
    pub folder_id: i64,
    /// Logical filename as shown to users.
    pub filename: String,
    /// Bucket-relative blob path.
    pub storage_path: String,
    /// User who uploaded the current bytes.
    pub uploaded_by: i64,
    /// When the current bytes were uploaded.
    pub uploaded_at: DateTime<Utc>,
}

/// Data required to register an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFileRecord {
    /// Target folder.
    pub folder_id: i64,
    /// Logical filename.
    pub filename: String,
    /// Bucket-relative blob path.
    pub storage_path: String,
    /// Uploader.
    pub uploaded_by: i64,
}

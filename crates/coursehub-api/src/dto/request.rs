//! Request DTOs.

use serde::Deserialize;
use validator::Validate;

/// Create a folder under `parent_id`, or under the course root.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Parent folder; the course root when absent.
    #[serde(default, alias = "parentId")]
    pub parent_id: Option<i64>,
    /// Folder name.
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Folder name is required"))]
    pub name: String,
}

/// Delete a material file.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteFileRequest {
    /// File record ID.
    #[serde(alias = "fileId")]
    pub file_id: i64,
    /// Storage path; must match the record.
    #[serde(default, alias = "filePath")]
    #[validate(length(min = 1, message = "filePath is required"))]
    pub file_path: String,
}

/// Query of `GET /api/files/signed-url`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignedUrlQuery {
    /// Bucket-relative storage path.
    #[serde(default, rename = "filePath", alias = "file_path")]
    #[validate(length(min = 1, message = "filePath is required"))]
    pub file_path: String,
}

/// Query of `GET /api/blobs/{path}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlobQuery {
    /// Expiry as a Unix timestamp.
    pub expires: i64,
    /// Signature token.
    pub token: String,
}

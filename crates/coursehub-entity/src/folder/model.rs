//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A node in a course's materials hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: i64,
    /// The course this folder belongs to.
    pub course_id: i64,
    /// Folder name. Sibling names are not required to be unique.
    pub name: String,
    /// Parent folder ID (null only for the course root).
    pub parent_id: Option<i64>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is the course root (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new non-root folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// The owning course.
    pub course_id: i64,
    /// Parent folder.
    pub parent_id: i64,
    /// Folder name.
    pub name: String,
}

//! Breadcrumb and folder listing value objects.

use serde::{Deserialize, Serialize};

use super::model::Folder;
use crate::file::FileRecord;

/// One hop of a root→folder breadcrumb trail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathSegment {
    /// Folder ID.
    pub id: i64,
    /// Folder name.
    pub name: String,
}

impl From<&Folder> for PathSegment {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name.clone(),
        }
    }
}

/// Everything a folder view needs in one response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderContents {
    /// The folder itself.
    pub folder: Folder,
    /// Breadcrumb trail starting at the course root and ending at `folder`.
    pub path: Vec<PathSegment>,
    /// Direct child folders.
    pub children: Vec<Folder>,
    /// Files stored directly in this folder.
    pub files: Vec<FileRecord>,
}

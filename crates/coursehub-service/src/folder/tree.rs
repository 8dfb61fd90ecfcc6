//! Breadcrumb resolution and whole-tree rendering.
//!
//! Both walks are bounded by `materials.max_tree_depth` so that a cycle or a
//! dangling parent pointer in stored data surfaces as a corrupt-tree error
//! instead of looping.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_database::{FileStore, FolderStore};
use coursehub_entity::file::FileRecord;
use coursehub_entity::folder::{Folder, PathSegment};

/// A folder with its files and subfolders.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    /// The folder itself.
    pub folder: Folder,
    /// Files directly inside the folder.
    pub files: Vec<FileRecord>,
    /// Subfolders.
    pub children: Vec<TreeNode>,
}

/// Walks parent and child pointers of the folder tree.
#[derive(Debug, Clone)]
pub struct TreeService {
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    max_depth: usize,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(folders: Arc<dyn FolderStore>, files: Arc<dyn FileStore>, max_depth: usize) -> Self {
        Self {
            folders,
            files,
            max_depth,
        }
    }

    /// Path from the course root down to `folder_id`, inclusive.
    ///
    /// Loads one folder per step. The first segment is always the root.
    pub async fn resolve_path(&self, folder_id: i64) -> AppResult<Vec<PathSegment>> {
        let start = self
            .folders
            .find_folder(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        let course_id = start.course_id;
        let mut segments = vec![PathSegment::from(&start)];
        let mut current = start;
        while let Some(parent_id) = current.parent_id {
            if segments.len() > self.max_depth {
                return Err(AppError::corrupt_tree(format!(
                    "Folder {folder_id} is deeper than {} levels or part of a cycle",
                    self.max_depth
                )));
            }
            let parent = self.folders.find_folder(parent_id).await?.ok_or_else(|| {
                AppError::corrupt_tree(format!(
                    "Folder {} references missing parent {parent_id}",
                    current.id
                ))
            })?;
            if parent.course_id != course_id {
                return Err(AppError::corrupt_tree(format!(
                    "Folder {} has a parent in another course",
                    current.id
                )));
            }
            segments.push(PathSegment::from(&parent));
            current = parent;
        }

        segments.reverse();
        Ok(segments)
    }

    /// The full subtree under `folder_id`, files included.
    pub async fn subtree(&self, folder_id: i64) -> AppResult<TreeNode> {
        let root = self
            .folders
            .find_folder(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;
        let mut visited = HashSet::new();
        self.build(root, 0, &mut visited).await
    }

    async fn build(
        &self,
        folder: Folder,
        depth: usize,
        visited: &mut HashSet<i64>,
    ) -> AppResult<TreeNode> {
        if depth > self.max_depth || !visited.insert(folder.id) {
            return Err(AppError::corrupt_tree(format!(
                "Folder {} revisited or nested deeper than {} levels",
                folder.id, self.max_depth
            )));
        }

        let files = self.files.find_by_folder(folder.id).await?;
        let mut children = Vec::new();
        for child in self.folders.find_children(folder.id).await? {
            children.push(Box::pin(self.build(child, depth + 1, visited)).await?);
        }

        Ok(TreeNode {
            folder,
            files,
            children,
        })
    }
}

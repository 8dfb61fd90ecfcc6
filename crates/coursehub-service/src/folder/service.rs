//! Course materials folders: lazy root, child creation and folder views.

use std::sync::Arc;

use tracing::info;

use coursehub_auth::AccessPolicy;
use coursehub_core::config::MaterialsConfig;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_database::{FileStore, FolderStore};
use coursehub_entity::file::FileRecord;
use coursehub_entity::folder::{CreateFolder, Folder, FolderContents};

use crate::context::RequestContext;
use crate::folder::tree::{TreeNode, TreeService};

/// Manages the per-course folder hierarchy.
#[derive(Debug, Clone)]
pub struct FolderService {
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    policy: AccessPolicy,
    tree: TreeService,
    root_name: String,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        policy: AccessPolicy,
        config: &MaterialsConfig,
    ) -> Self {
        let tree = TreeService::new(folders.clone(), files.clone(), config.max_tree_depth);
        Self {
            folders,
            files,
            policy,
            tree,
            root_name: config.root_folder_name.clone(),
        }
    }

    /// Return the course root, creating it on first access.
    ///
    /// Safe under concurrent first access: the store guarantees a single
    /// root per course and every caller gets that row back.
    pub async fn ensure_root(&self, course_id: i64) -> AppResult<Folder> {
        if let Some(root) = self.folders.find_root(course_id).await? {
            return Ok(root);
        }
        let root = self
            .folders
            .insert_root_if_absent(course_id, &self.root_name)
            .await?;
        info!(course_id, folder_id = root.id, "Materials root ready");
        Ok(root)
    }

    /// Open the materials view at the course root.
    pub async fn open_root(&self, ctx: &RequestContext, course_id: i64) -> AppResult<FolderContents> {
        let course = self.policy.member_course(&ctx.identity, course_id).await?;
        let root = self.ensure_root(course.id).await?;
        self.contents_of(root).await
    }

    /// Folder view with breadcrumb, children and files.
    pub async fn folder_contents(
        &self,
        ctx: &RequestContext,
        course_id: i64,
        folder_id: i64,
    ) -> AppResult<FolderContents> {
        let course = self.policy.member_course(&ctx.identity, course_id).await?;
        let folder = self.folder_in_course(course.id, folder_id).await?;
        self.contents_of(folder).await
    }

    /// Create a folder under `parent_id`, or under the root when `None`.
    ///
    /// Sibling names may repeat.
    pub async fn create_child(
        &self,
        ctx: &RequestContext,
        course_id: i64,
        parent_id: Option<i64>,
        name: &str,
    ) -> AppResult<Folder> {
        let course = self.policy.owned_course(&ctx.identity, course_id).await?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name is required"));
        }

        let parent = match parent_id {
            Some(id) => self.folder_in_course(course.id, id).await?,
            None => self.ensure_root(course.id).await?,
        };

        let folder = self
            .folders
            .create_folder(&CreateFolder {
                course_id: course.id,
                parent_id: parent.id,
                name: name.to_string(),
            })
            .await?;

        info!(
            user_id = ctx.user_id(),
            course_id = course.id,
            parent_id = parent.id,
            folder_id = folder.id,
            "Folder created"
        );
        Ok(folder)
    }

    /// The whole materials tree of a course, files included.
    pub async fn course_tree(&self, ctx: &RequestContext, course_id: i64) -> AppResult<TreeNode> {
        let course = self.policy.member_course(&ctx.identity, course_id).await?;
        let root = self.ensure_root(course.id).await?;
        self.tree.subtree(root.id).await
    }

    /// Direct subfolders of a folder.
    pub async fn list_children(
        &self,
        ctx: &RequestContext,
        course_id: i64,
        folder_id: i64,
    ) -> AppResult<Vec<Folder>> {
        let course = self.policy.member_course(&ctx.identity, course_id).await?;
        let folder = self.folder_in_course(course.id, folder_id).await?;
        self.folders.find_children(folder.id).await
    }

    /// Files stored directly in a folder.
    pub async fn list_files(
        &self,
        ctx: &RequestContext,
        course_id: i64,
        folder_id: i64,
    ) -> AppResult<Vec<FileRecord>> {
        let course = self.policy.member_course(&ctx.identity, course_id).await?;
        let folder = self.folder_in_course(course.id, folder_id).await?;
        self.files.find_by_folder(folder.id).await
    }

    /// Load a folder and check it belongs to `course_id`.
    ///
    /// A folder from another course is reported as missing.
    pub async fn folder_in_course(&self, course_id: i64, folder_id: i64) -> AppResult<Folder> {
        self.folders
            .find_folder(folder_id)
            .await?
            .filter(|f| f.course_id == course_id)
            .ok_or_else(|| {
                AppError::not_found(format!("Folder {folder_id} not found in course {course_id}"))
            })
    }

    async fn contents_of(&self, folder: Folder) -> AppResult<FolderContents> {
        let path = self.tree.resolve_path(folder.id).await?;
        let children = self.folders.find_children(folder.id).await?;
        let files = self.files.find_by_folder(folder.id).await?;
        Ok(FolderContents {
            folder,
            path,
            children,
            files,
        })
    }
}

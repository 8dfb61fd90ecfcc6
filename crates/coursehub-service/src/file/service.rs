//! Material file lookup and deletion.

use std::sync::Arc;

use tracing::{info, warn};

use coursehub_auth::AccessPolicy;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_core::traits::BlobStore;
use coursehub_database::{FileStore, FolderStore};
use coursehub_entity::course::Course;
use coursehub_entity::file::FileRecord;

use crate::context::RequestContext;

/// Reads and deletes material file records together with their blobs.
#[derive(Debug, Clone)]
pub struct FileService {
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    storage: Arc<dyn BlobStore>,
    policy: AccessPolicy,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        storage: Arc<dyn BlobStore>,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            folders,
            files,
            storage,
            policy,
        }
    }

    /// A file record visible to course members.
    pub async fn get_file(
        &self,
        ctx: &RequestContext,
        course_id: i64,
        file_id: i64,
    ) -> AppResult<FileRecord> {
        let course = self.policy.member_course(&ctx.identity, course_id).await?;
        self.file_in_course(&course, file_id).await
    }

    /// Delete a material file: blob first, then the record.
    ///
    /// `storage_path` must equal the record's path. If the blob store
    /// refuses the delete, the record is left in place and the upstream
    /// error is returned.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        course_id: i64,
        file_id: i64,
        storage_path: &str,
    ) -> AppResult<FileRecord> {
        let course = self.policy.owned_course(&ctx.identity, course_id).await?;
        let record = self.file_in_course(&course, file_id).await?;

        if storage_path != record.storage_path {
            return Err(AppError::validation(format!(
                "File path does not match file {file_id}"
            )));
        }

        let removed = self.storage.delete(&record.storage_path).await?;
        if !removed {
            warn!(
                file_id,
                path = %record.storage_path,
                "Blob already missing; removing record"
            );
        }

        self.files.delete_file(record.id).await?;

        info!(
            user_id = ctx.user_id(),
            course_id = course.id,
            file_id,
            filename = %record.filename,
            "Material deleted"
        );
        Ok(record)
    }

    async fn file_in_course(&self, course: &Course, file_id: i64) -> AppResult<FileRecord> {
        let not_found = || AppError::not_found(format!("File {file_id} not found"));
        let record = self.files.find_file(file_id).await?.ok_or_else(not_found)?;
        let folder = self
            .folders
            .find_folder(record.folder_id)
            .await?
            .ok_or_else(not_found)?;
        if folder.course_id != course.id {
            return Err(not_found());
        }
        Ok(record)
    }
}

//! Material uploads with overwrite semantics.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use coursehub_auth::AccessPolicy;
use coursehub_core::config::StorageConfig;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_database::{FileStore, FolderStore};
use coursehub_entity::file::{CreateFileRecord, FileRecord};
use coursehub_storage::paths::{material_path, validate_filename};

use crate::context::RequestContext;
use crate::file::replace::BlobReplacer;

/// Upload parameters for one material file.
#[derive(Debug, Clone)]
pub struct UploadParams {
    /// Course the folder belongs to.
    pub course_id: i64,
    /// Target folder.
    pub folder_id: i64,
    /// Logical filename.
    pub filename: String,
    /// File content.
    pub data: Bytes,
}

/// Stores material files, replacing any file of the same name in the folder.
#[derive(Debug, Clone)]
pub struct UploadService {
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    policy: AccessPolicy,
    replacer: BlobReplacer,
    max_upload_size_bytes: u64,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        policy: AccessPolicy,
        replacer: BlobReplacer,
        config: &StorageConfig,
    ) -> Self {
        Self {
            folders,
            files,
            policy,
            replacer,
            max_upload_size_bytes: config.max_upload_size_bytes,
        }
    }

    /// Upload a file into a folder the caller's course owns.
    ///
    /// Any earlier file with the same name in the folder is replaced, blob
    /// first, so exactly one record remains.
    pub async fn upload(&self, ctx: &RequestContext, params: UploadParams) -> AppResult<FileRecord> {
        let course = self
            .policy
            .owned_course(&ctx.identity, params.course_id)
            .await?;

        validate_filename(&params.filename)?;
        if params.data.len() as u64 > self.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.max_upload_size_bytes
            )));
        }

        let folder = self
            .folders
            .find_folder(params.folder_id)
            .await?
            .filter(|f| f.course_id == course.id)
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Folder {} not found in course {}",
                    params.folder_id, course.id
                ))
            })?;

        let storage_path = material_path(course.id, folder.id, &params.filename);
        let size = params.data.len();
        let record = CreateFileRecord {
            folder_id: folder.id,
            filename: params.filename.clone(),
            storage_path: storage_path.clone(),
            uploaded_by: ctx.user_id(),
        };

        let files = self.files.clone();
        let created = self
            .replacer
            .replace(&storage_path, params.data, || async move {
                files.replace_file(&record).await
            })
            .await?;

        info!(
            user_id = ctx.user_id(),
            course_id = course.id,
            folder_id = folder.id,
            file_id = created.id,
            filename = %created.filename,
            bytes = size,
            "Material uploaded"
        );
        Ok(created)
    }
}

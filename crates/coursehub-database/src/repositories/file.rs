//! Material file record repository.

use async_trait::async_trait;
use sqlx::PgPool;

use coursehub_core::error::{AppError, ErrorKind};
use coursehub_core::result::AppResult;
use coursehub_entity::file::{CreateFileRecord, FileRecord};

use crate::traits::FileStore;

const FILE_COLUMNS: &str = "id, folder_id, filename, storage_path, uploaded_by, uploaded_at";

/// Repository for material file metadata.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn find_file(&self, file_id: i64) -> AppResult<Option<FileRecord>> {
        sqlx::query_as::<_, FileRecord>(&format!(
            "SELECT {FILE_COLUMNS} FROM material_files WHERE id = $1"
        ))
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn find_by_folder(&self, folder_id: i64) -> AppResult<Vec<FileRecord>> {
        sqlx::query_as::<_, FileRecord>(&format!(
            "SELECT {FILE_COLUMNS} FROM material_files \
             WHERE folder_id = $1 ORDER BY filename ASC"
        ))
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn replace_file(&self, data: &CreateFileRecord) -> AppResult<FileRecord> {
        // `id = DEFAULT` draws a new ID, so a replaced file is a new record.
        sqlx::query_as::<_, FileRecord>(&format!(
            "INSERT INTO material_files (folder_id, filename, storage_path, uploaded_by) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ON CONSTRAINT material_files_folder_filename_key DO UPDATE \
             SET id = DEFAULT, \
                 storage_path = EXCLUDED.storage_path, \
                 uploaded_by = EXCLUDED.uploaded_by, \
                 uploaded_at = NOW() \
             RETURNING {FILE_COLUMNS}"
        ))
        .bind(data.folder_id)
        .bind(&data.filename)
        .bind(&data.storage_path)
        .bind(data.uploaded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("Folder {} not found", data.folder_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to replace file record", e),
        })
    }

    async fn delete_file(&self, file_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM material_files WHERE id = $1")
            .bind(file_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }
}

//! Material folder repository.

use async_trait::async_trait;
use sqlx::PgPool;

use coursehub_core::error::{AppError, ErrorKind};
use coursehub_core::result::AppResult;
use coursehub_entity::folder::{CreateFolder, Folder};

use crate::traits::FolderStore;

const FOLDER_COLUMNS: &str = "id, course_id, name, parent_id, created_at";

/// Repository for the per-course folder tree.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn find_folder(&self, folder_id: i64) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM material_folders WHERE id = $1"
        ))
        .bind(folder_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_root(&self, course_id: i64) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM material_folders \
             WHERE course_id = $1 AND parent_id IS NULL"
        ))
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find root folder", e))
    }

    async fn insert_root_if_absent(&self, course_id: i64, name: &str) -> AppResult<Folder> {
        let inserted = sqlx::query_as::<_, Folder>(&format!(
            "INSERT INTO material_folders (course_id, name, parent_id) VALUES ($1, $2, NULL) \
             ON CONFLICT (course_id) WHERE parent_id IS NULL DO NOTHING \
             RETURNING {FOLDER_COLUMNS}"
        ))
        .bind(course_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("Course {course_id} not found"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create root folder", e),
        })?;

        if let Some(folder) = inserted {
            return Ok(folder);
        }

        // Lost the race: another caller's root is now visible.
        self.find_root(course_id).await?.ok_or_else(|| {
            AppError::database(format!("Root folder for course {course_id} vanished"))
        })
    }

    async fn create_folder(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(&format!(
            "INSERT INTO material_folders (course_id, name, parent_id) VALUES ($1, $2, $3) \
             RETURNING {FOLDER_COLUMNS}"
        ))
        .bind(data.course_id)
        .bind(&data.name)
        .bind(data.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("Parent folder {} not found", data.parent_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create folder", e),
        })
    }

    async fn find_children(&self, parent_id: i64) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM material_folders \
             WHERE parent_id = $1 ORDER BY name ASC, id ASC"
        ))
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }
}

//! Course and enrollment repository.

use async_trait::async_trait;
use sqlx::PgPool;

use coursehub_core::error::{AppError, ErrorKind};
use coursehub_core::result::AppResult;
use coursehub_entity::course::Course;

use crate::traits::CourseStore;

/// Repository for course lookups and enrollment checks.
#[derive(Debug, Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    /// Create a new course repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseStore for CourseRepository {
    async fn find_course(&self, course_id: i64) -> AppResult<Option<Course>> {
        sqlx::query_as::<_, Course>(
            "SELECT id, title, teacher_id, created_at FROM courses WHERE id = $1",
        )
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find course", e))
    }

    async fn is_enrolled(&self, user_id: i64, course_id: i64) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM course_enrollments WHERE user_id = $1 AND course_id = $2)",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check enrollment", e))
    }
}

//! Assignment repository.

use async_trait::async_trait;
use sqlx::PgPool;

use coursehub_core::error::{AppError, ErrorKind};
use coursehub_core::result::AppResult;
use coursehub_entity::assignment::Assignment;

use crate::traits::AssignmentStore;

/// Repository for assignment lookups.
#[derive(Debug, Clone)]
pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    /// Create a new assignment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentStore for AssignmentRepository {
    async fn find_assignment(&self, assignment_id: i64) -> AppResult<Option<Assignment>> {
        sqlx::query_as::<_, Assignment>(
            "SELECT id, course_id, title, submission_name FROM assignments WHERE id = $1",
        )
        .bind(assignment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find assignment", e))
    }
}

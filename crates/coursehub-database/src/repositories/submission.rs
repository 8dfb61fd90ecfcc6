//! Assignment submission repository.

use async_trait::async_trait;
use sqlx::PgPool;

use coursehub_core::error::{AppError, ErrorKind};
use coursehub_core::result::AppResult;
use coursehub_entity::assignment::{CreateSubmission, Submission};

use crate::traits::SubmissionStore;

const SUBMISSION_COLUMNS: &str =
    "id, assignment_id, course_id, user_id, file_path, submitted_at";

/// Repository for student submissions.
#[derive(Debug, Clone)]
pub struct SubmissionRepository {
    pool: PgPool,
}

impl SubmissionRepository {
    /// Create a new submission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for SubmissionRepository {
    async fn find_submission(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> AppResult<Option<Submission>> {
        sqlx::query_as::<_, Submission>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM assignment_submissions \
             WHERE assignment_id = $1 AND user_id = $2"
        ))
        .bind(assignment_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find submission", e))
    }

    async fn list_submissions(&self, assignment_id: i64) -> AppResult<Vec<Submission>> {
        sqlx::query_as::<_, Submission>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM assignment_submissions \
             WHERE assignment_id = $1 ORDER BY user_id ASC"
        ))
        .bind(assignment_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list submissions", e))
    }

    async fn replace_submission(&self, data: &CreateSubmission) -> AppResult<Submission> {
        sqlx::query_as::<_, Submission>(&format!(
            "INSERT INTO assignment_submissions (assignment_id, course_id, user_id, file_path) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ON CONSTRAINT assignment_submissions_assignment_user_key DO UPDATE \
             SET id = DEFAULT, \
                 file_path = EXCLUDED.file_path, \
                 submitted_at = NOW() \
             RETURNING {SUBMISSION_COLUMNS}"
        ))
        .bind(data.assignment_id)
        .bind(data.course_id)
        .bind(data.user_id)
        .bind(&data.file_path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to replace submission", e))
    }
}

//! Assignment and submission entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An assignment that expects one file per student.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    /// Unique assignment identifier.
    pub id: i64,
    /// The course this assignment belongs to.
    pub course_id: i64,
    /// Assignment title.
    pub title: String,
    /// Exact filename every submission must carry (case-sensitive).
    pub submission_name: String,
}

impl Assignment {
    /// Byte-for-byte comparison against the required submission name.
    pub fn accepts_filename(&self, filename: &str) -> bool {
        self.submission_name == filename
    }
}

/// A student's current submission. `(assignment_id, user_id)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Submission {
    /// Unique submission identifier.
    pub id: i64,
    /// Assignment submitted to.
    pub assignment_id: i64,
    /// Course of the assignment.
    pub course_id: i64,
    /// Submitting student.
    pub user_id: i64,
    /// Bucket-relative blob path of the submission slot.
    pub file_path: String,
    /// When the current file was submitted.
    pub submitted_at: DateTime<Utc>,
}

/// Data required to record a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubmission {
    /// Assignment submitted to.
    pub assignment_id: i64,
    /// Course of the assignment.
    pub course_id: i64,
    /// Submitting student.
    pub user_id: i64,
    /// Blob path of the submission slot.
    pub file_path: String,
}

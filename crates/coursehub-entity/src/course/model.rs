//! Course entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A course owned by exactly one teacher.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    /// Unique course identifier.
    pub id: i64,
    /// Course title.
    pub title: String,
    /// The owning teacher's user ID.
    pub teacher_id: i64,
    /// When the course was created.
    pub created_at: DateTime<Utc>,
}

impl Course {
    /// Whether `user_id` owns this course.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.teacher_id == user_id
    }
}

/// A student's membership in a course. `(user_id, course_id)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    /// Enrolled user.
    pub user_id: i64,
    /// Course enrolled in.
    pub course_id: i64,
}

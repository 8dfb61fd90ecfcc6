//! Authenticated caller identity.

use serde::{Deserialize, Serialize};

use coursehub_entity::user::UserRole;

/// Who is making the request, as established by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User ID.
    pub user_id: i64,
    /// Role claimed in the token.
    pub role: UserRole,
    /// Display name.
    pub name: String,
}

impl Identity {
    /// Build an identity.
    pub fn new(user_id: i64, role: UserRole, name: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            name: name.into(),
        }
    }

    /// Shorthand for a teacher identity.
    pub fn teacher(user_id: i64) -> Self {
        Self::new(user_id, UserRole::Teacher, format!("teacher-{user_id}"))
    }

    /// Shorthand for a student identity.
    pub fn student(user_id: i64) -> Self {
        Self::new(user_id, UserRole::Student, format!("student-{user_id}"))
    }
}

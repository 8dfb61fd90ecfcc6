//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles issued by the identity provider.
///
/// Capability checks go through the predicate methods below rather than
/// comparing role strings at each call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Owns courses, curates materials, grades.
    Teacher,
    /// Enrolls in courses, reads materials, submits assignments.
    Student,
}

impl UserRole {
    /// Whether this role may own courses and curate their materials.
    pub fn can_manage_materials(&self) -> bool {
        matches!(self, Self::Teacher)
    }

    /// Whether this role may hand in assignment files.
    pub fn can_submit_assignments(&self) -> bool {
        matches!(self, Self::Student)
    }

    /// Return the role as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "TEACHER",
            Self::Student => "STUDENT",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = coursehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TEACHER" => Ok(Self::Teacher),
            "STUDENT" => Ok(Self::Student),
            _ => Err(coursehub_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: TEACHER, STUDENT"
            ))),
        }
    }
}

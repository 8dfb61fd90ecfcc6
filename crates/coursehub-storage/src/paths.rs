//! Object path layout.
//!
//! Every object lives at a path derived from database identifiers:
//!
//! - materials: `courses/{course_id}/folders/{folder_id}/{filename}`
//! - submissions: `courses/{course_id}/assignments/{assignment_id}/submissions/{user_id}/{filename}`

use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;

/// Reject filenames that could escape their directory or are unusable.
pub fn validate_filename(filename: &str) -> AppResult<()> {
    if filename.trim().is_empty() {
        return Err(AppError::validation("Filename is required"));
    }
    if filename == "." || filename == ".." {
        return Err(AppError::validation(format!("Invalid filename '{filename}'")));
    }
    if filename.contains(['/', '\\']) || filename.chars().any(char::is_control) {
        return Err(AppError::validation(format!(
            "Filename '{filename}' contains forbidden characters"
        )));
    }
    Ok(())
}

/// Reject paths with empty, `.` or `..` segments, or a leading slash.
pub fn validate_path(path: &str) -> AppResult<()> {
    if path.is_empty() {
        return Err(AppError::validation("File path is required"));
    }
    let bad_segment = path
        .split('/')
        .any(|s| s.is_empty() || s == "." || s == ".." || s.contains('\\'));
    if bad_segment || path.chars().any(char::is_control) {
        return Err(AppError::validation(format!("Invalid file path '{path}'")));
    }
    Ok(())
}

/// Path of a course material file.
pub fn material_path(course_id: i64, folder_id: i64, filename: &str) -> String {
    format!("courses/{course_id}/folders/{folder_id}/{filename}")
}

/// Path of a student's submission slot.
pub fn submission_path(course_id: i64, assignment_id: i64, user_id: i64, filename: &str) -> String {
    format!("courses/{course_id}/assignments/{assignment_id}/submissions/{user_id}/{filename}")
}

/// A parsed object path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobPath {
    /// A file in a materials folder.
    Material {
        /// Owning course.
        course_id: i64,
        /// Folder holding the file.
        folder_id: i64,
        /// Logical filename.
        filename: String,
    },
    /// A student's submission.
    Submission {
        /// Owning course.
        course_id: i64,
        /// Assignment submitted to.
        assignment_id: i64,
        /// Submitting student.
        user_id: i64,
        /// Submitted filename.
        filename: String,
    },
}

impl BlobPath {
    /// Parse a path produced by [`material_path`] or [`submission_path`].
    pub fn parse(path: &str) -> AppResult<Self> {
        validate_path(path)?;
        let invalid = || AppError::validation(format!("Unrecognized file path '{path}'"));
        let id = |s: &str| s.parse::<i64>().map_err(|_| invalid());

        let segments: Vec<&str> = path.split('/').collect();
        match segments.as_slice() {
            ["courses", course, "folders", folder, filename] => Ok(Self::Material {
                course_id: id(course)?,
                folder_id: id(folder)?,
                filename: (*filename).to_string(),
            }),
            ["courses", course, "assignments", assignment, "submissions", user, filename] => {
                Ok(Self::Submission {
                    course_id: id(course)?,
                    assignment_id: id(assignment)?,
                    user_id: id(user)?,
                    filename: (*filename).to_string(),
                })
            }
            _ => Err(invalid()),
        }
    }

    /// The course the object belongs to.
    pub fn course_id(&self) -> i64 {
        match self {
            Self::Material { course_id, .. } | Self::Submission { course_id, .. } => *course_id,
        }
    }
}

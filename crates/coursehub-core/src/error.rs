//! Unified application error types for CourseHub.
//!
//! All crates map their internal errors into [`AppError`] so failures
//! propagate through `?` and are converted to a status/message pair only at
//! the request boundary.

use std::fmt;
use thiserror::Error;

/// Error categories shared by every crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested course, assignment, folder, file or object does not exist.
    NotFound,
    /// No valid caller identity was presented.
    Unauthenticated,
    /// Role or ownership mismatch.
    PermissionDenied,
    /// A required field is missing or malformed.
    Validation,
    /// An uploaded submission does not carry the required filename.
    FilenameMismatch,
    /// A unique key would be duplicated.
    Conflict,
    /// A parent-pointer walk hit a cycle or a missing parent.
    CorruptTree,
    /// The blob store rejected an operation.
    UpstreamStorage,
    /// The relational store rejected an operation.
    Database,
    /// Configuration could not be loaded or is inconsistent.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// Anything else.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::PermissionDenied => write!(f, "PERMISSION_DENIED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::FilenameMismatch => write!(f, "FILENAME_MISMATCH"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::CorruptTree => write!(f, "CORRUPT_TREE"),
            Self::UpstreamStorage => write!(f, "UPSTREAM_STORAGE"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout CourseHub.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an unauthenticated error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Create a permission-denied error.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PermissionDenied, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a filename-mismatch error.
    pub fn filename_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FilenameMismatch, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a corrupt-tree error.
    pub fn corrupt_tree(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CorruptTree, message)
    }

    /// Create an upstream storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UpstreamStorage, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Returns `true` if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::UpstreamStorage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

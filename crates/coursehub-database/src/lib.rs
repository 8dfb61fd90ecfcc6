//! # coursehub-database
//!
//! Store traits consumed by the service layer, their PostgreSQL
//! implementations, and a process-local implementation used by tests and
//! the `memory` backend.

pub mod connection;
pub mod memory;
mod migration;
pub mod repositories;
pub mod traits;

use std::sync::Arc;

use sqlx::PgPool;

pub use connection::DatabasePool;
pub use memory::MemoryDatabase;
pub use traits::{AssignmentStore, CourseStore, FileStore, FolderStore, SubmissionStore};

/// The full set of stores handed to services.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// Courses and enrollments.
    pub courses: Arc<dyn CourseStore>,
    /// Material folders.
    pub folders: Arc<dyn FolderStore>,
    /// Material file records.
    pub files: Arc<dyn FileStore>,
    /// Assignments.
    pub assignments: Arc<dyn AssignmentStore>,
    /// Assignment submissions.
    pub submissions: Arc<dyn SubmissionStore>,
}

impl Repositories {
    /// Stores backed by PostgreSQL.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            courses: Arc::new(repositories::CourseRepository::new(pool.clone())),
            folders: Arc::new(repositories::FolderRepository::new(pool.clone())),
            files: Arc::new(repositories::FileRepository::new(pool.clone())),
            assignments: Arc::new(repositories::AssignmentRepository::new(pool.clone())),
            submissions: Arc::new(repositories::SubmissionRepository::new(pool)),
        }
    }

    /// Stores backed by a shared in-memory database.
    pub fn memory(db: Arc<MemoryDatabase>) -> Self {
        Self {
            courses: db.clone(),
            folders: db.clone(),
            files: db.clone(),
            assignments: db.clone(),
            submissions: db,
        }
    }
}

//! Store traits the service layer depends on.
//!
//! Each trait covers one table (or one table pair) and is implemented by a
//! PostgreSQL repository in [`crate::repositories`] and by
//! [`crate::memory::MemoryDatabase`].

use async_trait::async_trait;

use coursehub_core::result::AppResult;
use coursehub_entity::assignment::{Assignment, CreateSubmission, Submission};
use coursehub_entity::course::Course;
use coursehub_entity::file::{CreateFileRecord, FileRecord};
use coursehub_entity::folder::{CreateFolder, Folder};

/// Read access to courses and enrollments.
#[async_trait]
pub trait CourseStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a course by ID.
    async fn find_course(&self, course_id: i64) -> AppResult<Option<Course>>;

    /// Whether an enrollment row exists for `(user_id, course_id)`.
    async fn is_enrolled(&self, user_id: i64, course_id: i64) -> AppResult<bool>;
}

/// Material folder persistence.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a folder by ID.
    async fn find_folder(&self, folder_id: i64) -> AppResult<Option<Folder>>;

    /// Find the course root, if it has been created.
    async fn find_root(&self, course_id: i64) -> AppResult<Option<Folder>>;

    /// Insert a root for `course_id` unless one exists, then return the
    /// course's single root. Concurrent callers observe the same row.
    async fn insert_root_if_absent(&self, course_id: i64, name: &str) -> AppResult<Folder>;

    /// Insert a non-root folder.
    async fn create_folder(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Direct children of a folder, ordered by name then ID.
    async fn find_children(&self, parent_id: i64) -> AppResult<Vec<Folder>>;
}

/// Material file record persistence.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a file record by ID.
    async fn find_file(&self, file_id: i64) -> AppResult<Option<FileRecord>>;

    /// Files in a folder, ordered by filename.
    async fn find_by_folder(&self, folder_id: i64) -> AppResult<Vec<FileRecord>>;

    /// Make `data` the only record for its `(folder_id, filename)`.
    ///
    /// Any earlier record for the name is dropped and the new row gets a
    /// fresh ID, in one atomic step. Concurrent callers never conflict; the
    /// last one to run wins.
    async fn replace_file(&self, data: &CreateFileRecord) -> AppResult<FileRecord>;

    /// Delete a record by ID. Returns `true` if a row was removed.
    async fn delete_file(&self, file_id: i64) -> AppResult<bool>;
}

/// Read access to assignments.
#[async_trait]
pub trait AssignmentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an assignment by ID.
    async fn find_assignment(&self, assignment_id: i64) -> AppResult<Option<Assignment>>;
}

/// Assignment submission persistence.
#[async_trait]
pub trait SubmissionStore: Send + Sync + std::fmt::Debug + 'static {
    /// The student's current submission, if any.
    async fn find_submission(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> AppResult<Option<Submission>>;

    /// All submissions for an assignment, ordered by student.
    async fn list_submissions(&self, assignment_id: i64) -> AppResult<Vec<Submission>>;

    /// Make `data` the student's only submission for the assignment, in one
    /// atomic step. The last concurrent caller wins.
    async fn replace_submission(&self, data: &CreateSubmission) -> AppResult<Submission>;
}

//! Process-local implementation of every store trait.
//!
//! Backs the `memory` database backend and the service/router tests. One
//! [`MemoryDatabase`] holds all tables behind a single lock, so each trait
//! method is atomic with respect to the others.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_entity::assignment::{Assignment, CreateSubmission, Submission};
use coursehub_entity::course::{Course, Enrollment};
use coursehub_entity::file::{CreateFileRecord, FileRecord};
use coursehub_entity::folder::{CreateFolder, Folder};

use crate::traits::{AssignmentStore, CourseStore, FileStore, FolderStore, SubmissionStore};

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    courses: BTreeMap<i64, Course>,
    enrollments: Vec<Enrollment>,
    folders: BTreeMap<i64, Folder>,
    files: BTreeMap<i64, FileRecord>,
    assignments: BTreeMap<i64, Assignment>,
    submissions: BTreeMap<i64, Submission>,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory relational store.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    tables: RwLock<Tables>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a course owned by `teacher_id`.
    pub async fn insert_course(&self, title: &str, teacher_id: i64) -> Course {
        let mut tables = self.tables.write().await;
        let id = tables.allocate_id();
        let course = Course {
            id,
            title: title.to_string(),
            teacher_id,
            created_at: Utc::now(),
        };
        tables.courses.insert(id, course.clone());
        course
    }

    /// Insert a course with a caller-chosen ID.
    pub async fn insert_course_with_id(&self, id: i64, title: &str, teacher_id: i64) -> Course {
        let mut tables = self.tables.write().await;
        tables.next_id = tables.next_id.max(id);
        let course = Course {
            id,
            title: title.to_string(),
            teacher_id,
            created_at: Utc::now(),
        };
        tables.courses.insert(id, course.clone());
        course
    }

    /// Enroll a user in a course. Repeated calls are no-ops.
    pub async fn enroll(&self, user_id: i64, course_id: i64) {
        let mut tables = self.tables.write().await;
        let exists = tables
            .enrollments
            .iter()
            .any(|e| e.user_id == user_id && e.course_id == course_id);
        if !exists {
            tables.enrollments.push(Enrollment { user_id, course_id });
        }
    }

    /// Insert an assignment that requires `submission_name`.
    pub async fn insert_assignment(
        &self,
        course_id: i64,
        title: &str,
        submission_name: &str,
    ) -> Assignment {
        let mut tables = self.tables.write().await;
        let id = tables.allocate_id();
        let assignment = Assignment {
            id,
            course_id,
            title: title.to_string(),
            submission_name: submission_name.to_string(),
        };
        tables.assignments.insert(id, assignment.clone());
        assignment
    }

    /// Overwrite a folder's parent pointer without any checks.
    ///
    /// Only useful for building deliberately broken trees.
    #[cfg(any(test, feature = "testing"))]
    pub async fn set_parent_unchecked(&self, folder_id: i64, parent_id: Option<i64>) {
        let mut tables = self.tables.write().await;
        if let Some(folder) = tables.folders.get_mut(&folder_id) {
            folder.parent_id = parent_id;
        }
    }

    /// Number of file records currently stored.
    #[cfg(any(test, feature = "testing"))]
    pub async fn file_count(&self) -> usize {
        self.tables.read().await.files.len()
    }
}

#[async_trait]
impl CourseStore for MemoryDatabase {
    async fn find_course(&self, course_id: i64) -> AppResult<Option<Course>> {
        Ok(self.tables.read().await.courses.get(&course_id).cloned())
    }

    async fn is_enrolled(&self, user_id: i64, course_id: i64) -> AppResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .enrollments
            .iter()
            .any(|e| e.user_id == user_id && e.course_id == course_id))
    }
}

#[async_trait]
impl FolderStore for MemoryDatabase {
    async fn find_folder(&self, folder_id: i64) -> AppResult<Option<Folder>> {
        Ok(self.tables.read().await.folders.get(&folder_id).cloned())
    }

    async fn find_root(&self, course_id: i64) -> AppResult<Option<Folder>> {
        Ok(self
            .tables
            .read()
            .await
            .folders
            .values()
            .find(|f| f.course_id == course_id && f.parent_id.is_none())
            .cloned())
    }

    async fn insert_root_if_absent(&self, course_id: i64, name: &str) -> AppResult<Folder> {
        let mut tables = self.tables.write().await;
        if !tables.courses.contains_key(&course_id) {
            return Err(AppError::not_found(format!("Course {course_id} not found")));
        }
        if let Some(root) = tables
            .folders
            .values()
            .find(|f| f.course_id == course_id && f.parent_id.is_none())
        {
            return Ok(root.clone());
        }
        let id = tables.allocate_id();
        let root = Folder {
            id,
            course_id,
            name: name.to_string(),
            parent_id: None,
            created_at: Utc::now(),
        };
        tables.folders.insert(id, root.clone());
        Ok(root)
    }

    async fn create_folder(&self, data: &CreateFolder) -> AppResult<Folder> {
        let mut tables = self.tables.write().await;
        if !tables.folders.contains_key(&data.parent_id) {
            return Err(AppError::not_found(format!(
                "Parent folder {} not found",
                data.parent_id
            )));
        }
        let id = tables.allocate_id();
        let folder = Folder {
            id,
            course_id: data.course_id,
            name: data.name.clone(),
            parent_id: Some(data.parent_id),
            created_at: Utc::now(),
        };
        tables.folders.insert(id, folder.clone());
        Ok(folder)
    }

    async fn find_children(&self, parent_id: i64) -> AppResult<Vec<Folder>> {
        let tables = self.tables.read().await;
        let mut children: Vec<Folder> = tables
            .folders
            .values()
            .filter(|f| f.parent_id == Some(parent_id))
            .cloned()
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(children)
    }
}

#[async_trait]
impl FileStore for MemoryDatabase {
    async fn find_file(&self, file_id: i64) -> AppResult<Option<FileRecord>> {
        Ok(self.tables.read().await.files.get(&file_id).cloned())
    }

    async fn find_by_folder(&self, folder_id: i64) -> AppResult<Vec<FileRecord>> {
        let tables = self.tables.read().await;
        let mut files: Vec<FileRecord> = tables
            .files
            .values()
            .filter(|f| f.folder_id == folder_id)
            .cloned()
            .collect();
        files.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(files)
    }

    async fn replace_file(&self, data: &CreateFileRecord) -> AppResult<FileRecord> {
        let mut tables = self.tables.write().await;
        if !tables.folders.contains_key(&data.folder_id) {
            return Err(AppError::not_found(format!(
                "Folder {} not found",
                data.folder_id
            )));
        }
        tables
            .files
            .retain(|_, f| !(f.folder_id == data.folder_id && f.filename == data.filename));
        let id = tables.allocate_id();
        let record = FileRecord {
            id,
            folder_id: data.folder_id,
            filename: data.filename.clone(),
            storage_path: data.storage_path.clone(),
            uploaded_by: data.uploaded_by,
            uploaded_at: Utc::now(),
        };
        tables.files.insert(id, record.clone());
        Ok(record)
    }

    async fn delete_file(&self, file_id: i64) -> AppResult<bool> {
        Ok(self.tables.write().await.files.remove(&file_id).is_some())
    }
}

#[async_trait]
impl AssignmentStore for MemoryDatabase {
    async fn find_assignment(&self, assignment_id: i64) -> AppResult<Option<Assignment>> {
        Ok(self
            .tables
            .read()
            .await
            .assignments
            .get(&assignment_id)
            .cloned())
    }
}

#[async_trait]
impl SubmissionStore for MemoryDatabase {
    async fn find_submission(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> AppResult<Option<Submission>> {
        Ok(self
            .tables
            .read()
            .await
            .submissions
            .values()
            .find(|s| s.assignment_id == assignment_id && s.user_id == user_id)
            .cloned())
    }

    async fn list_submissions(&self, assignment_id: i64) -> AppResult<Vec<Submission>> {
        let tables = self.tables.read().await;
        let mut list: Vec<Submission> = tables
            .submissions
            .values()
            .filter(|s| s.assignment_id == assignment_id)
            .cloned()
            .collect();
        list.sort_by_key(|s| s.user_id);
        Ok(list)
    }

    async fn replace_submission(&self, data: &CreateSubmission) -> AppResult<Submission> {
        let mut tables = self.tables.write().await;
        tables
            .submissions
            .retain(|_, s| !(s.assignment_id == data.assignment_id && s.user_id == data.user_id));
        let id = tables.allocate_id();
        let submission = Submission {
            id,
            assignment_id: data.assignment_id,
            course_id: data.course_id,
            user_id: data.user_id,
            file_path: data.file_path.clone(),
            submitted_at: Utc::now(),
        };
        tables.submissions.insert(id, submission.clone());
        Ok(submission)
    }
}

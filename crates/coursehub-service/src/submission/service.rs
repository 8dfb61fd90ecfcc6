//! Filename-matched assignment submissions, one slot per student.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use coursehub_auth::AccessPolicy;
use coursehub_core::config::StorageConfig;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_database::{AssignmentStore, SubmissionStore};
use coursehub_entity::assignment::{Assignment, CreateSubmission, Submission};
use coursehub_entity::user::UserRole;
use coursehub_storage::paths::{submission_path, validate_filename};

use crate::context::RequestContext;
use crate::file::replace::BlobReplacer;

/// Accepts student submissions and lists them for the course teacher.
#[derive(Debug, Clone)]
pub struct SubmissionService {
    assignments: Arc<dyn AssignmentStore>,
    submissions: Arc<dyn SubmissionStore>,
    policy: AccessPolicy,
    replacer: BlobReplacer,
    max_upload_size_bytes: u64,
}

impl SubmissionService {
    /// Creates a new submission service.
    pub fn new(
        assignments: Arc<dyn AssignmentStore>,
        submissions: Arc<dyn SubmissionStore>,
        policy: AccessPolicy,
        replacer: BlobReplacer,
        config: &StorageConfig,
    ) -> Self {
        Self {
            assignments,
            submissions,
            policy,
            replacer,
            max_upload_size_bytes: config.max_upload_size_bytes,
        }
    }

    /// Hand in `filename` for an assignment, replacing any earlier submission.
    ///
    /// The name must equal the assignment's required name byte for byte.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        course_id: i64,
        assignment_id: i64,
        filename: &str,
        data: Bytes,
    ) -> AppResult<Submission> {
        self.policy.require_role(&ctx.identity, UserRole::Student)?;
        let course = self.policy.member_course(&ctx.identity, course_id).await?;
        let assignment = self.assignment_in_course(course.id, assignment_id).await?;

        if !assignment.accepts_filename(filename) {
            return Err(AppError::filename_mismatch(format!(
                "Please upload the file as \"{}\".",
                assignment.submission_name
            )));
        }
        validate_filename(filename)?;
        if data.len() as u64 > self.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.max_upload_size_bytes
            )));
        }

        let user_id = ctx.user_id();
        let path = submission_path(course.id, assignment.id, user_id, filename);
        let size = data.len();
        let row = CreateSubmission {
            assignment_id: assignment.id,
            course_id: course.id,
            user_id,
            file_path: path.clone(),
        };

        let submissions = self.submissions.clone();
        let submission = self
            .replacer
            .replace(&path, data, || async move {
                submissions.replace_submission(&row).await
            })
            .await?;

        info!(
            user_id,
            course_id = course.id,
            assignment_id = assignment.id,
            submission_id = submission.id,
            bytes = size,
            "Assignment submitted"
        );
        Ok(submission)
    }

    /// The calling student's current submission.
    pub async fn own_submission(
        &self,
        ctx: &RequestContext,
        course_id: i64,
        assignment_id: i64,
    ) -> AppResult<Submission> {
        self.policy.require_role(&ctx.identity, UserRole::Student)?;
        let course = self.policy.member_course(&ctx.identity, course_id).await?;
        let assignment = self.assignment_in_course(course.id, assignment_id).await?;
        self.submissions
            .find_submission(assignment.id, ctx.user_id())
            .await?
            .ok_or_else(|| AppError::not_found("You have not submitted this assignment yet"))
    }

    /// Every submission for an assignment, for the owning teacher.
    pub async fn list_submissions(
        &self,
        ctx: &RequestContext,
        course_id: i64,
        assignment_id: i64,
    ) -> AppResult<Vec<Submission>> {
        let course = self.policy.owned_course(&ctx.identity, course_id).await?;
        let assignment = self.assignment_in_course(course.id, assignment_id).await?;
        self.submissions.list_submissions(assignment.id).await
    }

    async fn assignment_in_course(&self, course_id: i64, assignment_id: i64) -> AppResult<Assignment> {
        self.assignments
            .find_assignment(assignment_id)
            .await?
            .filter(|a| a.course_id == course_id)
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Assignment {assignment_id} not found in course {course_id}"
                ))
            })
    }
}

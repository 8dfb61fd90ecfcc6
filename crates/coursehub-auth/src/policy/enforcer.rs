//! Role, ownership and enrollment checks.
//!
//! Every mutation of course materials goes through
//! [`AccessPolicy::require_course_ownership`]; every read goes through
//! [`AccessPolicy::require_enrollment_or_ownership`].

use std::sync::Arc;

use tracing::debug;

use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_database::CourseStore;
use coursehub_entity::course::Course;
use coursehub_entity::user::UserRole;

use crate::identity::Identity;

/// Enforces who may read or change a course's materials.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    courses: Arc<dyn CourseStore>,
}

impl AccessPolicy {
    /// Creates a policy that looks up courses and enrollments in `courses`.
    pub fn new(courses: Arc<dyn CourseStore>) -> Self {
        Self { courses }
    }

    /// Require the caller to act as `role`.
    ///
    /// Teachers are recognised by the material-management capability and
    /// students by the submission capability.
    pub fn require_role(&self, identity: &Identity, role: UserRole) -> AppResult<()> {
        let allowed = match role {
            UserRole::Teacher => identity.role.can_manage_materials(),
            UserRole::Student => identity.role.can_submit_assignments(),
        };
        if allowed {
            Ok(())
        } else {
            Err(AppError::permission_denied(format!(
                "This action requires the {role} role"
            )))
        }
    }

    /// Require a teacher who owns `course`.
    pub fn require_course_ownership(&self, identity: &Identity, course: &Course) -> AppResult<()> {
        if is_owner(identity, course) {
            Ok(())
        } else {
            debug!(
                user_id = identity.user_id,
                course_id = course.id,
                "Ownership check failed"
            );
            Err(AppError::permission_denied(format!(
                "Only the teacher who owns course {} may do this",
                course.id
            )))
        }
    }

    /// Require an enrollment row for the caller, or course ownership.
    pub async fn require_enrollment_or_ownership(
        &self,
        identity: &Identity,
        course: &Course,
    ) -> AppResult<()> {
        if is_owner(identity, course) {
            return Ok(());
        }
        if self.courses.is_enrolled(identity.user_id, course.id).await? {
            return Ok(());
        }
        debug!(
            user_id = identity.user_id,
            course_id = course.id,
            "Membership check failed"
        );
        Err(AppError::permission_denied(format!(
            "You are not a member of course {}",
            course.id
        )))
    }

    /// Load a course or fail with not-found.
    pub async fn load_course(&self, course_id: i64) -> AppResult<Course> {
        self.courses
            .find_course(course_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Course {course_id} not found")))
    }

    /// Load a course the caller owns.
    pub async fn owned_course(&self, identity: &Identity, course_id: i64) -> AppResult<Course> {
        let course = self.load_course(course_id).await?;
        self.require_course_ownership(identity, &course)?;
        Ok(course)
    }

    /// Load a course the caller belongs to.
    pub async fn member_course(&self, identity: &Identity, course_id: i64) -> AppResult<Course> {
        let course = self.load_course(course_id).await?;
        self.require_enrollment_or_ownership(identity, &course)
            .await?;
        Ok(course)
    }
}

/// Only a role that manages materials can own a course.
fn is_owner(identity: &Identity, course: &Course) -> bool {
    identity.role.can_manage_materials() && course.is_owned_by(identity.user_id)
}

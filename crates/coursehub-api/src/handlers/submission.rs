//! Assignment submission handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use coursehub_entity::assignment::Submission;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, UploadForm};
use crate::state::AppState;

/// POST /api/courses/{course_id}/assignments/{assignment_id}/submit (multipart: `file`)
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((course_id, assignment_id)): Path<(i64, i64)>,
    mut form: UploadForm,
) -> Result<(StatusCode, Json<ApiResponse<Submission>>), ApiError> {
    let (filename, data) = form.file()?;
    let submission = state
        .submission_service
        .submit(&auth, course_id, assignment_id, &filename, data)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(submission))))
}

/// GET /api/courses/{course_id}/assignments/{assignment_id}/submission
pub async fn own_submission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((course_id, assignment_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<Submission>>, ApiError> {
    let submission = state
        .submission_service
        .own_submission(&auth, course_id, assignment_id)
        .await?;
    Ok(Json(ApiResponse::ok(submission)))
}

/// GET /api/courses/{course_id}/assignments/{assignment_id}/submissions
pub async fn list_submissions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((course_id, assignment_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<Vec<Submission>>>, ApiError> {
    let submissions = state
        .submission_service
        .list_submissions(&auth, course_id, assignment_id)
        .await?;
    Ok(Json(ApiResponse::ok(submissions)))
}

//! Course materials handlers: folder views, folder creation, uploads and
//! deletes.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use coursehub_core::error::AppError;
use coursehub_entity::file::FileRecord;
use coursehub_entity::folder::{Folder, FolderContents};
use coursehub_service::TreeNode;
use coursehub_service::file::upload::UploadParams;

use crate::dto::request::{CreateFolderRequest, DeleteFileRequest};
use crate::dto::response::{ApiResponse, DeletedFileResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, UploadForm};
use crate::state::AppState;

/// GET /api/courses/{course_id}/materials
pub async fn open_root(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<i64>,
) -> Result<Json<ApiResponse<FolderContents>>, ApiError> {
    let contents = state.folder_service.open_root(&auth, course_id).await?;
    Ok(Json(ApiResponse::ok(contents)))
}

/// GET /api/courses/{course_id}/materials/folders/{folder_id}
pub async fn folder_contents(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((course_id, folder_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<FolderContents>>, ApiError> {
    let contents = state
        .folder_service
        .folder_contents(&auth, course_id, folder_id)
        .await?;
    Ok(Json(ApiResponse::ok(contents)))
}

/// GET /api/courses/{course_id}/materials/tree
pub async fn course_tree(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<i64>,
) -> Result<Json<ApiResponse<TreeNode>>, ApiError> {
    let tree = state.folder_service.course_tree(&auth, course_id).await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// GET /api/courses/{course_id}/materials/folders/{folder_id}/children
pub async fn list_children(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((course_id, folder_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<Vec<Folder>>>, ApiError> {
    let children = state
        .folder_service
        .list_children(&auth, course_id, folder_id)
        .await?;
    Ok(Json(ApiResponse::ok(children)))
}

/// GET /api/courses/{course_id}/materials/folders/{folder_id}/files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((course_id, folder_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<Vec<FileRecord>>>, ApiError> {
    let files = state
        .folder_service
        .list_files(&auth, course_id, folder_id)
        .await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// GET /api/courses/{course_id}/materials/files/{file_id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((course_id, file_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<FileRecord>>, ApiError> {
    let record = state.file_service.get_file(&auth, course_id, file_id).await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// POST /api/courses/{course_id}/materials/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<i64>,
    payload: Result<Json<CreateFolderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Folder>>), ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let folder = state
        .folder_service
        .create_child(&auth, course_id, req.parent_id, &req.name)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// POST /api/courses/{course_id}/materials/files (multipart: `folder_id`, `file`)
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<i64>,
    mut form: UploadForm,
) -> Result<(StatusCode, Json<ApiResponse<FileRecord>>), ApiError> {
    let folder_id = form
        .i64_field("folder_id")?
        .ok_or_else(|| AppError::validation("Field 'folder_id' is required"))?;
    let (filename, data) = form.file()?;

    let record = state
        .upload_service
        .upload(
            &auth,
            UploadParams {
                course_id,
                folder_id,
                filename,
                data,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(record))))
}

/// POST /api/courses/{course_id}/materials/files/delete
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<i64>,
    payload: Result<Json<DeleteFileRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<DeletedFileResponse>>, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let removed = state
        .file_service
        .delete(&auth, course_id, req.file_id, &req.file_path)
        .await?;
    Ok(Json(ApiResponse::ok(DeletedFileResponse {
        file_id: removed.id,
        storage_path: removed.storage_path,
    })))
}

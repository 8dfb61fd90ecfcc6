//! Route definitions for the CourseHub HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room for multipart boundaries and text fields on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the Axum router with every route and the request logger.
pub fn build_router(state: AppState) -> Router {
    let body_limit =
        usize::try_from(state.config.storage.max_upload_size_bytes).unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .merge(material_routes())
        .merge(assignment_routes())
        .merge(download_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(
            body_limit.saturating_add(MULTIPART_OVERHEAD_BYTES),
        ))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Folder tree, uploads and deletes
fn material_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/courses/{course_id}/materials",
            get(handlers::materials::open_root),
        )
        .route(
            "/courses/{course_id}/materials/tree",
            get(handlers::materials::course_tree),
        )
        .route(
            "/courses/{course_id}/materials/folders",
            post(handlers::materials::create_folder),
        )
        .route(
            "/courses/{course_id}/materials/folders/{folder_id}",
            get(handlers::materials::folder_contents),
        )
        .route(
            "/courses/{course_id}/materials/folders/{folder_id}/children",
            get(handlers::materials::list_children),
        )
        .route(
            "/courses/{course_id}/materials/folders/{folder_id}/files",
            get(handlers::materials::list_files),
        )
        .route(
            "/courses/{course_id}/materials/files",
            post(handlers::materials::upload_file),
        )
        .route(
            "/courses/{course_id}/materials/files/{file_id}",
            get(handlers::materials::get_file),
        )
        .route(
            "/courses/{course_id}/materials/files/delete",
            post(handlers::materials::delete_file),
        )
}

/// Assignment submissions
fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/courses/{course_id}/assignments/{assignment_id}/submit",
            post(handlers::submission::submit),
        )
        .route(
            "/courses/{course_id}/assignments/{assignment_id}/submission",
            get(handlers::submission::own_submission),
        )
        .route(
            "/courses/{course_id}/assignments/{assignment_id}/submissions",
            get(handlers::submission::list_submissions),
        )
}

/// Signed URLs and the blob route behind them
fn download_routes() -> Router<AppState> {
    Router::new()
        .route("/files/signed-url", get(handlers::files::signed_url))
        .route("/blobs/{*path}", get(handlers::blobs::fetch_blob))
}

/// Health endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

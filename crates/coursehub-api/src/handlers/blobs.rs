//! Serves objects behind locally signed URLs.

use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::dto::request::BlobQuery;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/blobs/{*path}?expires=&token=
///
/// No bearer token: the signature is the credential.
pub async fn fetch_blob(
    State(state): State<AppState>,
    Path(path): Path<String>,
    query: Result<Query<BlobQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let (meta, stream) = state
        .download_service
        .open_signed(&path, query.expires, &query.token)
        .await?;

    let filename = path.rsplit('/').next().unwrap_or(path.as_str());
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        filename.replace('"', "")
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/octet-stream"),
            ),
            (header::CONTENT_LENGTH, HeaderValue::from(meta.size_bytes)),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CACHE_CONTROL, HeaderValue::from_static("private, no-store")),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}

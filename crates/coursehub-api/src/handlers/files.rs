//! Signed download links.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Redirect;
use validator::Validate;

use crate::dto::request::SignedUrlQuery;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/files/signed-url?filePath=...
///
/// Answers with a 307 redirect to a short-lived URL for the object.
pub async fn signed_url(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<SignedUrlQuery>, QueryRejection>,
) -> Result<Redirect, ApiError> {
    let Query(query) = query?;
    query.validate()?;

    let signed = state
        .download_service
        .signed_url(&auth, &query.file_path)
        .await?;
    Ok(Redirect::temporary(&signed.url))
}

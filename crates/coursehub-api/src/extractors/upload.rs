//! Multipart form extractor for single-file uploads.

use std::collections::HashMap;

use axum::extract::{FromRequest, Multipart, Request};
use bytes::Bytes;

use coursehub_core::error::AppError;

use crate::error::ApiError;

/// Name of the multipart part carrying the file.
pub const FILE_FIELD: &str = "file";

/// A multipart body with one file part and any number of text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    /// Text fields by name.
    pub fields: HashMap<String, String>,
    /// Client-supplied filename of the `file` part.
    pub filename: Option<String>,
    /// Contents of the `file` part.
    pub data: Option<Bytes>,
}

impl UploadForm {
    /// The uploaded file, or a validation error when none was sent.
    pub fn file(&mut self) -> Result<(String, Bytes), AppError> {
        let data = self
            .data
            .take()
            .ok_or_else(|| AppError::validation("No file provided"))?;
        let filename = self
            .filename
            .take()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::validation("Uploaded file has no filename"))?;
        Ok((filename, data))
    }

    /// Parse an optional integer text field.
    pub fn i64_field(&self, name: &str) -> Result<Option<i64>, AppError> {
        match self.fields.get(name).map(|v| v.trim()) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| AppError::validation(format!("Field '{name}' must be an integer"))),
        }
    }
}

impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        let mut form = UploadForm::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if name == FILE_FIELD {
                form.filename = field.file_name().map(String::from);
                form.data = Some(field.bytes().await?);
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }
}

//! Blob store trait for pluggable object storage backends.

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::Stream;

use crate::result::AppResult;

/// Metadata about a stored object.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BlobMeta {
    /// Path within the bucket.
    pub path: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Last modified timestamp (if the backend reports one).
    pub last_modified: Option<DateTime<Utc>>,
}

/// A time-limited, credential-free download link for one object.
///
/// Deliberately not `Serialize`: the URL is handed back to the caller and
/// must not be persisted or logged.
#[derive(Clone)]
pub struct SignedUrl {
    /// The full URL.
    pub url: String,
    /// When the URL stops working.
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for SignedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedUrl")
            .field("url", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// A byte stream type used for reading object contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for object storage backends.
///
/// Paths are bucket-relative, `/`-separated keys such as
/// `courses/7/folders/3/notes.pdf`. Implementations exist for the local
/// filesystem, process memory and S3 in `coursehub-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store `data` at `path`.
    ///
    /// With `overwrite == false` an existing object yields a conflict error.
    async fn put(&self, path: &str, data: Bytes, overwrite: bool) -> AppResult<()>;

    /// Read a whole object into memory. Missing objects yield not-found.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Open an object as a byte stream. Missing objects yield not-found.
    async fn read(&self, path: &str) -> AppResult<ByteStream>;

    /// Delete the object at `path`.
    ///
    /// Returns `Ok(false)` when nothing was stored there; any other failure
    /// is an upstream storage error.
    async fn delete(&self, path: &str) -> AppResult<bool>;

    /// Check whether an object exists.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Object metadata. Missing objects yield not-found.
    async fn metadata(&self, path: &str) -> AppResult<BlobMeta>;

    /// Issue a signed download URL valid for `ttl`. Missing objects yield
    /// not-found.
    async fn signed_url(&self, path: &str, ttl: Duration) -> AppResult<SignedUrl>;
}

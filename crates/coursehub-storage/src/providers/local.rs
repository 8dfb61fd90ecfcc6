//! Local filesystem blob store.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::debug;

use coursehub_core::error::{AppError, ErrorKind};
use coursehub_core::result::AppResult;
use coursehub_core::traits::{BlobMeta, BlobStore, ByteStream, SignedUrl};

use crate::paths::validate_path;
use crate::signer::UrlSigner;

/// Stores each object as a file under `{root_path}/{bucket}/`.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Bucket directory holding every object.
    root: PathBuf,
    signer: UrlSigner,
}

impl LocalBlobStore {
    /// Create a store rooted at `root_path/bucket`, creating the directory.
    pub async fn new(root_path: &str, bucket: &str, signer: UrlSigner) -> AppResult<Self> {
        let root = PathBuf::from(root_path).join(bucket);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::UpstreamStorage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root, signer })
    }

    /// Resolve a bucket-relative path to a file below the root.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        validate_path(path)?;
        Ok(self.root.join(path))
    }

    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::UpstreamStorage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    /// Remove empty directories between `path` and the bucket root.
    async fn prune_empty_parents(&self, path: &Path) {
        let mut current = path.parent();
        while let Some(dir) = current {
            if dir == self.root || fs::remove_dir(dir).await.is_err() {
                break;
            }
            current = dir.parent();
        }
    }
}

fn not_found_or_storage(path: &str, action: &str, e: std::io::Error) -> AppError {
    if e.kind() == std::io::ErrorKind::NotFound {
        AppError::not_found(format!("Object not found: {path}"))
    } else {
        AppError::with_source(
            ErrorKind::UpstreamStorage,
            format!("Failed to {action} object: {path}"),
            e,
        )
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn put(&self, path: &str, data: Bytes, overwrite: bool) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        self.ensure_parent(&full_path).await?;

        let mut options = fs::OpenOptions::new();
        options.write(true);
        if overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = options.open(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                AppError::conflict(format!("Object already exists: {path}"))
            } else {
                AppError::with_source(
                    ErrorKind::UpstreamStorage,
                    format!("Failed to open object for writing: {path}"),
                    e,
                )
            }
        })?;

        file.write_all(&data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::UpstreamStorage,
                format!("Failed to write object: {path}"),
                e,
            )
        })?;
        file.flush().await.map_err(|e| {
            AppError::with_source(ErrorKind::UpstreamStorage, "Failed to flush object", e)
        })?;

        debug!(path, bytes = data.len(), "Wrote object");
        Ok(())
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(path)?;
        let data = fs::read(&full_path)
            .await
            .map_err(|e| not_found_or_storage(path, "read", e))?;
        Ok(Bytes::from(data))
    }

    async fn read(&self, path: &str) -> AppResult<ByteStream> {
        let full_path = self.resolve(path)?;
        let file = fs::File::open(&full_path)
            .await
            .map_err(|e| not_found_or_storage(path, "open", e))?;

        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream.map(|r| r.map(Bytes::from))))
    }

    async fn delete(&self, path: &str) -> AppResult<bool> {
        let full_path = self.resolve(path)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                self.prune_empty_parents(&full_path).await;
                debug!(path, "Deleted object");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::UpstreamStorage,
                format!("Failed to delete object: {path}"),
                e,
            )),
        }
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        let full_path = self.resolve(path)?;
        match fs::metadata(&full_path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(not_found_or_storage(path, "stat", e)),
        }
    }

    async fn metadata(&self, path: &str) -> AppResult<BlobMeta> {
        let full_path = self.resolve(path)?;
        let meta = fs::metadata(&full_path)
            .await
            .map_err(|e| not_found_or_storage(path, "stat", e))?;
        if !meta.is_file() {
            return Err(AppError::not_found(format!("Object not found: {path}")));
        }

        Ok(BlobMeta {
            path: path.to_string(),
            size_bytes: meta.len(),
            last_modified: meta.modified().ok().map(chrono::DateTime::<chrono::Utc>::from),
        })
    }

    async fn signed_url(&self, path: &str, ttl: Duration) -> AppResult<SignedUrl> {
        if !self.exists(path).await? {
            return Err(AppError::not_found(format!("Object not found: {path}")));
        }
        Ok(self.signer.sign(path, ttl))
    }
}

//! Process-memory blob store.
//!
//! Used by the `memory` provider and by tests. Failure switches let tests
//! drive the upload and delete paths into their upstream-error branches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_core::traits::{BlobMeta, BlobStore, ByteStream, SignedUrl};

use crate::paths::validate_path;
use crate::signer::UrlSigner;

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    modified: DateTime<Utc>,
}

/// Blob store keeping every object in a concurrent map.
#[derive(Debug, Clone)]
pub struct MemoryBlobStore {
    objects: Arc<DashMap<String, StoredObject>>,
    signer: UrlSigner,
    fail_puts: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new(signer: UrlSigner) -> Self {
        Self {
            objects: Arc::new(DashMap::new()),
            signer,
            fail_puts: Arc::new(AtomicBool::new(false)),
            fail_deletes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent `put` fail with an upstream error.
    pub fn set_fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `delete` fail with an upstream error.
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, path: &str, data: Bytes, overwrite: bool) -> AppResult<()> {
        validate_path(path)?;
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(AppError::storage(format!("Upload rejected for {path}")));
        }
        let object = StoredObject {
            data,
            modified: Utc::now(),
        };
        match self.objects.entry(path.to_string()) {
            Entry::Occupied(_) if !overwrite => {
                Err(AppError::conflict(format!("Object already exists: {path}")))
            }
            Entry::Occupied(mut entry) => {
                entry.insert(object);
                Ok(())
            }
            Entry::Vacant(entry) => {
                entry.insert(object);
                Ok(())
            }
        }
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        self.objects
            .get(path)
            .map(|o| o.data.clone())
            .ok_or_else(|| AppError::not_found(format!("Object not found: {path}")))
    }

    async fn read(&self, path: &str) -> AppResult<ByteStream> {
        let data = self.read_bytes(path).await?;
        Ok(Box::pin(futures::stream::once(async move {
            Ok::<_, std::io::Error>(data)
        })))
    }

    async fn delete(&self, path: &str) -> AppResult<bool> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::storage(format!("Delete rejected for {path}")));
        }
        Ok(self.objects.remove(path).is_some())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        Ok(self.objects.contains_key(path))
    }

    async fn metadata(&self, path: &str) -> AppResult<BlobMeta> {
        self.objects
            .get(path)
            .map(|o| BlobMeta {
                path: path.to_string(),
                size_bytes: o.data.len() as u64,
                last_modified: Some(o.modified),
            })
            .ok_or_else(|| AppError::not_found(format!("Object not found: {path}")))
    }

    async fn signed_url(&self, path: &str, ttl: Duration) -> AppResult<SignedUrl> {
        if !self.objects.contains_key(path) {
            return Err(AppError::not_found(format!("Object not found: {path}")));
        }
        Ok(self.signer.sign(path, ttl))
    }
}

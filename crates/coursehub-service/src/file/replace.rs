//! The delete-then-put-then-record sequence shared by material uploads and
//! assignment submissions.
//!
//! Steps run in order and stop at the first failure; nothing is rolled back.
//! The worst outcome is a blob without a record, or a record pointing at a
//! blob that has already been removed.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};

use coursehub_core::result::AppResult;
use coursehub_core::traits::BlobStore;

use crate::file::locks::PathLocks;

/// Replaces the blob at a path and then the metadata that references it.
#[derive(Debug, Clone)]
pub struct BlobReplacer {
    storage: Arc<dyn BlobStore>,
    locks: PathLocks,
}

impl BlobReplacer {
    /// Creates a replacer over `storage`.
    pub fn new(storage: Arc<dyn BlobStore>, locks: PathLocks) -> Self {
        Self { storage, locks }
    }

    /// Delete any blob at `path`, store `data` there, then run `record`.
    ///
    /// `record` is expected to swap in the new metadata row atomically, so
    /// that writers racing on one path all succeed and the last one wins.
    pub async fn replace<T, F, Fut>(&self, path: &str, data: Bytes, record: F) -> AppResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let _guard = self.locks.acquire(path).await;

        let removed = self.storage.delete(path).await?;
        debug!(path, removed, "Cleared previous blob");

        let size = data.len();
        if let Err(e) = self.storage.put(path, data, true).await {
            if removed {
                warn!(path, error = %e, "Upload failed after previous blob was removed");
            }
            return Err(e);
        }

        match record().await {
            Ok(value) => {
                debug!(path, bytes = size, "Blob and record replaced");
                Ok(value)
            }
            Err(e) => {
                warn!(path, error = %e, "Blob stored but metadata update failed");
                Err(e)
            }
        }
    }
}

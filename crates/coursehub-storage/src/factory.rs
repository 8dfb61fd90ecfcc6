//! Blob store construction from configuration.

use std::sync::Arc;

use tracing::info;

use coursehub_core::config::{ServerConfig, StorageConfig};
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_core::traits::BlobStore;

use crate::providers::{LocalBlobStore, MemoryBlobStore};
use crate::signer::UrlSigner;

/// Build the signer used by the local and memory providers.
pub fn build_signer(storage: &StorageConfig, server: &ServerConfig) -> UrlSigner {
    UrlSigner::new(
        storage.signing_secret.as_bytes(),
        &storage.bucket,
        &server.public_url,
    )
}

/// Instantiate the provider named by `storage.provider`.
pub async fn build_blob_store(
    storage: &StorageConfig,
    server: &ServerConfig,
) -> AppResult<Arc<dyn BlobStore>> {
    let store: Arc<dyn BlobStore> = match storage.provider.as_str() {
        "local" => Arc::new(
            LocalBlobStore::new(
                &storage.local.root_path,
                &storage.bucket,
                build_signer(storage, server),
            )
            .await?,
        ),
        "memory" => Arc::new(MemoryBlobStore::new(build_signer(storage, server))),
        #[cfg(feature = "s3")]
        "s3" => Arc::new(crate::providers::S3BlobStore::new(&storage.s3, &storage.bucket).await?),
        other => {
            return Err(AppError::configuration(format!(
                "Unsupported storage provider '{other}'"
            )));
        }
    };

    info!(
        provider = store.provider_type(),
        bucket = %storage.bucket,
        "Blob store ready"
    );
    Ok(store)
}

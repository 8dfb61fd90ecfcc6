//! S3-compatible object store (requires the `s3` feature).

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream as S3Body;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use coursehub_core::config::S3StorageConfig;
use coursehub_core::error::{AppError, ErrorKind};
use coursehub_core::result::AppResult;
use coursehub_core::traits::{BlobMeta, BlobStore, ByteStream, SignedUrl};

use crate::paths::validate_path;

/// Blob store backed by one S3 bucket. Signed URLs are native S3 presigned
/// GET requests.
#[derive(Debug, Clone)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
}

impl S3BlobStore {
    /// Build a client from configuration.
    pub async fn new(config: &S3StorageConfig, bucket: &str) -> AppResult<Self> {
        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket,
            "Initializing S3 blob store"
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if !config.access_key.is_empty() {
            loader = loader.credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "coursehub",
            ));
        }
        let shared = loader.load().await;

        let mut builder =
            aws_sdk_s3::config::Builder::from(&shared).force_path_style(config.force_path_style);
        if !config.endpoint.is_empty() {
            builder = builder.endpoint_url(config.endpoint.clone());
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: bucket.to_string(),
        })
    }

    async fn head(&self, path: &str) -> AppResult<Option<BlobMeta>> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
        {
            Ok(out) => Ok(Some(BlobMeta {
                path: path.to_string(),
                size_bytes: out.content_length().unwrap_or(0).max(0) as u64,
                last_modified: out
                    .last_modified()
                    .and_then(|t| DateTime::<Utc>::from_timestamp(t.secs(), 0)),
            })),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(None),
            Err(e) => Err(AppError::with_source(
                ErrorKind::UpstreamStorage,
                format!("Failed to stat object {path}: {e}"),
                e,
            )),
        }
    }

    async fn get_body(&self, path: &str) -> AppResult<S3Body> {
        match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
        {
            Ok(out) => Ok(out.body),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_no_such_key()) => {
                Err(AppError::not_found(format!("Object not found: {path}")))
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::UpstreamStorage,
                format!("Failed to read object {path}: {e}"),
                e,
            )),
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok())
    }

    async fn put(&self, path: &str, data: Bytes, overwrite: bool) -> AppResult<()> {
        validate_path(path)?;
        if !overwrite && self.head(path).await?.is_some() {
            return Err(AppError::conflict(format!("Object already exists: {path}")));
        }

        let len = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(S3Body::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::UpstreamStorage,
                    format!("Failed to upload object {path}: {e}"),
                    e,
                )
            })?;

        debug!(path, bytes = len, "Uploaded object");
        Ok(())
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        let body = self.get_body(path).await?;
        let collected = body.collect().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::UpstreamStorage,
                format!("Failed to read object body {path}"),
                e,
            )
        })?;
        Ok(collected.into_bytes())
    }

    async fn read(&self, path: &str) -> AppResult<ByteStream> {
        let body = self.get_body(path).await?;
        let stream = ReaderStream::new(body.into_async_read());
        Ok(Box::pin(stream.map(|r| r.map(Bytes::from))))
    }

    async fn delete(&self, path: &str) -> AppResult<bool> {
        // S3 reports success for absent keys, so check first.
        if self.head(path).await?.is_none() {
            return Ok(false);
        }
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::UpstreamStorage,
                    format!("Failed to delete object {path}: {e}"),
                    e,
                )
            })?;
        debug!(path, "Deleted object");
        Ok(true)
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        Ok(self.head(path).await?.is_some())
    }

    async fn metadata(&self, path: &str) -> AppResult<BlobMeta> {
        self.head(path)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Object not found: {path}")))
    }

    async fn signed_url(&self, path: &str, ttl: Duration) -> AppResult<SignedUrl> {
        if !self.exists(path).await? {
            return Err(AppError::not_found(format!("Object not found: {path}")));
        }
        let presigning = PresigningConfig::expires_in(ttl).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Invalid signed URL lifetime", e)
        })?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .presigned(presigning)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::UpstreamStorage,
                    format!("Failed to presign object {path}: {e}"),
                    e,
                )
            })?;

        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::seconds(60));
        Ok(SignedUrl {
            url: request.uri().to_string(),
            expires_at: Utc::now() + ttl,
        })
    }
}

//! Signed download links and the blob route behind them.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use coursehub_auth::AccessPolicy;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_core::traits::{BlobMeta, BlobStore, ByteStream, SignedUrl};
use coursehub_storage::{BlobPath, UrlSigner};

use crate::context::RequestContext;

/// Issues short-lived download URLs and serves signed blob requests.
#[derive(Debug, Clone)]
pub struct DownloadService {
    storage: Arc<dyn BlobStore>,
    policy: AccessPolicy,
    signer: UrlSigner,
    ttl: Duration,
}

impl DownloadService {
    /// Creates a new download service. `ttl` applies to every issued URL.
    pub fn new(
        storage: Arc<dyn BlobStore>,
        policy: AccessPolicy,
        signer: UrlSigner,
        ttl: Duration,
    ) -> Self {
        Self {
            storage,
            policy,
            signer,
            ttl,
        }
    }

    /// Issue a signed URL for `path`.
    ///
    /// The caller must belong to the path's course. Submission paths are
    /// further limited to the submitting student and the owning teacher.
    pub async fn signed_url(&self, ctx: &RequestContext, path: &str) -> AppResult<SignedUrl> {
        let parsed = BlobPath::parse(path)?;
        let course = self
            .policy
            .member_course(&ctx.identity, parsed.course_id())
            .await?;

        if let BlobPath::Submission { user_id, .. } = &parsed {
            let is_owner = self
                .policy
                .require_course_ownership(&ctx.identity, &course)
                .is_ok();
            if !is_owner && *user_id != ctx.user_id() {
                return Err(AppError::permission_denied(
                    "Submissions can only be downloaded by their author or the course teacher",
                ));
            }
        }

        let signed = self.storage.signed_url(path, self.ttl).await?;
        info!(
            user_id = ctx.user_id(),
            course_id = course.id,
            expires_at = %signed.expires_at,
            "Issued download link"
        );
        Ok(signed)
    }

    /// Verify a signed blob request and open the object.
    pub async fn open_signed(
        &self,
        path: &str,
        expires: i64,
        token: &str,
    ) -> AppResult<(BlobMeta, ByteStream)> {
        self.signer.verify(path, expires, token)?;
        let meta = self.storage.metadata(path).await?;
        let stream = self.storage.read(path).await?;
        Ok((meta, stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::upload::UploadParams;
    use crate::testing::*;
    use bytes::Bytes;
    use coursehub_core::error::ErrorKind;
    use futures::StreamExt;

    fn query_param<'a>(url: &'a str, key: &str) -> &'a str {
        url.split_once('?')
            .map(|(_, q)| q)
            .unwrap_or_default()
            .split('&')
            .find_map(|kv| kv.strip_prefix(&format!("{key}=")))
            .unwrap_or_default()
    }

    async fn material(fx: &Fixture) -> String {
        let root = fx.folders.ensure_root(COURSE).await.unwrap();
        fx.uploads
            .upload(
                &owner(),
                UploadParams {
                    course_id: COURSE,
                    folder_id: root.id,
                    filename: "notes.pdf".to_string(),
                    data: Bytes::from_static(b"lecture"),
                },
            )
            .await
            .unwrap()
            .storage_path
    }

    #[tokio::test]
    async fn test_member_gets_working_link() {
        let fx = Fixture::new().await;
        let path = material(&fx).await;

        let signed = fx.downloads.signed_url(&student(), &path).await.unwrap();
        let expires: i64 = query_param(&signed.url, "expires").parse().unwrap();
        let token = query_param(&signed.url, "token");

        let (meta, mut stream) = fx.downloads.open_signed(&path, expires, token).await.unwrap();
        assert_eq!(meta.size_bytes, 7);
        assert_eq!(stream.next().await.unwrap().unwrap(), Bytes::from_static(b"lecture"));

        match fx.downloads.open_signed(&path, expires, "forged").await {
            Ok(_) => panic!("forged token opened the blob"),
            Err(err) => assert_eq!(err.kind, ErrorKind::PermissionDenied),
        }
    }

    #[tokio::test]
    async fn test_outsider_and_bad_paths_rejected() {
        let fx = Fixture::new().await;
        let path = material(&fx).await;

        let err = fx.downloads.signed_url(&outsider(), &path).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::PermissionDenied);

        let err = fx.downloads.signed_url(&student(), "../../etc/passwd").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = fx
            .downloads
            .signed_url(&student(), "courses/7/folders/1/missing.pdf")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_submission_links_limited_to_author_and_owner() {
        let fx = Fixture::new().await;
        let submission = fx
            .submissions
            .submit(
                &student(),
                COURSE,
                fx.assignment.id,
                "hw1.pdf",
                Bytes::from_static(b"answers"),
            )
            .await
            .unwrap();

        assert!(fx.downloads.signed_url(&student(), &submission.file_path).await.is_ok());
        assert!(fx.downloads.signed_url(&owner(), &submission.file_path).await.is_ok());

        let err = fx
            .downloads
            .signed_url(&other_student(), &submission.file_path)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::PermissionDenied);
    }
}

//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use coursehub_auth::{AccessPolicy, JwtDecoder};
use coursehub_core::config::AppConfig;
use coursehub_core::traits::BlobStore;
use coursehub_database::{DatabasePool, Repositories};
use coursehub_service::{
    BlobReplacer, DownloadService, FileService, FolderService, PathLocks, SubmissionService,
    UploadService,
};
use coursehub_storage::build_signer;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool, absent on the memory backend
    pub db_pool: Option<DatabasePool>,
    /// Blob store
    pub storage: Arc<dyn BlobStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token decoder
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Folder tree and materials view
    pub folder_service: Arc<FolderService>,
    /// Material uploads
    pub upload_service: Arc<UploadService>,
    /// Material file lookup and deletion
    pub file_service: Arc<FileService>,
    /// Signed URLs and signed blob reads
    pub download_service: Arc<DownloadService>,
    /// Assignment submissions
    pub submission_service: Arc<SubmissionService>,
}

impl AppState {
    /// Wire every service from the stores and the blob store.
    pub fn new(
        config: AppConfig,
        repos: Repositories,
        storage: Arc<dyn BlobStore>,
        db_pool: Option<DatabasePool>,
    ) -> Self {
        let policy = AccessPolicy::new(repos.courses.clone());
        let replacer = BlobReplacer::new(
            storage.clone(),
            PathLocks::new(config.storage.serialize_path_writes),
        );
        let signer = build_signer(&config.storage, &config.server);

        let folder_service = FolderService::new(
            repos.folders.clone(),
            repos.files.clone(),
            policy.clone(),
            &config.materials,
        );
        let upload_service = UploadService::new(
            repos.folders.clone(),
            repos.files.clone(),
            policy.clone(),
            replacer.clone(),
            &config.storage,
        );
        let file_service = FileService::new(
            repos.folders.clone(),
            repos.files.clone(),
            storage.clone(),
            policy.clone(),
        );
        let download_service = DownloadService::new(
            storage.clone(),
            policy.clone(),
            signer,
            Duration::from_secs(config.storage.signed_url_ttl_seconds),
        );
        let submission_service = SubmissionService::new(
            repos.assignments.clone(),
            repos.submissions.clone(),
            policy,
            replacer,
            &config.storage,
        );

        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            config: Arc::new(config),
            db_pool,
            storage,
            folder_service: Arc::new(folder_service),
            upload_service: Arc::new(upload_service),
            file_service: Arc::new(file_service),
            download_service: Arc::new(download_service),
            submission_service: Arc::new(submission_service),
        }
    }
}

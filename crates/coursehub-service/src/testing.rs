//! Shared fixtures for service tests: one course with an owner, an enrolled
//! student, an outsider and an assignment requiring `hw1.pdf`.

use std::sync::Arc;
use std::time::Duration;

use coursehub_auth::{AccessPolicy, Identity};
use coursehub_core::config::{MaterialsConfig, StorageConfig};
use coursehub_core::traits::BlobStore;
use coursehub_database::MemoryDatabase;
use coursehub_entity::assignment::Assignment;
use coursehub_storage::UrlSigner;
use coursehub_storage::providers::MemoryBlobStore;

use crate::context::RequestContext;
use crate::file::{BlobReplacer, DownloadService, FileService, PathLocks, UploadService};
use crate::folder::FolderService;
use crate::submission::SubmissionService;

pub const COURSE: i64 = 7;
pub const OWNER: i64 = 100;
pub const OTHER_TEACHER: i64 = 101;
pub const STUDENT: i64 = 200;
pub const OTHER_STUDENT: i64 = 201;
pub const OUTSIDER: i64 = 300;

pub struct Fixture {
    pub db: Arc<MemoryDatabase>,
    pub blobs: MemoryBlobStore,
    pub folders: FolderService,
    pub uploads: UploadService,
    pub files: FileService,
    pub downloads: DownloadService,
    pub submissions: SubmissionService,
    pub assignment: Assignment,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::build(true).await
    }

    /// Same course, with `serialize_path_writes` off.
    pub async fn unlocked() -> Self {
        Self::build(false).await
    }

    async fn build(serialize_path_writes: bool) -> Self {
        let db = Arc::new(MemoryDatabase::new());
        db.insert_course_with_id(COURSE, "Databases", OWNER).await;
        db.enroll(STUDENT, COURSE).await;
        db.enroll(OTHER_STUDENT, COURSE).await;
        let assignment = db.insert_assignment(COURSE, "Homework 1", "hw1.pdf").await;

        let signer = UrlSigner::new(b"test", "course-materials", "http://localhost:8080");
        let blobs = MemoryBlobStore::new(signer.clone());
        let storage: Arc<dyn BlobStore> = Arc::new(blobs.clone());
        let policy = AccessPolicy::new(db.clone());
        let replacer = BlobReplacer::new(storage.clone(), PathLocks::new(serialize_path_writes));
        let storage_config = StorageConfig::default();

        Self {
            folders: FolderService::new(
                db.clone(),
                db.clone(),
                policy.clone(),
                &MaterialsConfig::default(),
            ),
            uploads: UploadService::new(
                db.clone(),
                db.clone(),
                policy.clone(),
                replacer.clone(),
                &storage_config,
            ),
            files: FileService::new(db.clone(), db.clone(), storage.clone(), policy.clone()),
            downloads: DownloadService::new(
                storage,
                policy.clone(),
                signer,
                Duration::from_secs(60),
            ),
            submissions: SubmissionService::new(
                db.clone(),
                db.clone(),
                policy,
                replacer,
                &storage_config,
            ),
            db,
            blobs,
            assignment,
        }
    }
}

pub fn owner() -> RequestContext {
    RequestContext::new(Identity::teacher(OWNER))
}

pub fn other_teacher() -> RequestContext {
    RequestContext::new(Identity::teacher(OTHER_TEACHER))
}

pub fn student() -> RequestContext {
    RequestContext::new(Identity::student(STUDENT))
}

pub fn other_student() -> RequestContext {
    RequestContext::new(Identity::student(OTHER_STUDENT))
}

pub fn outsider() -> RequestContext {
    RequestContext::new(Identity::student(OUTSIDER))
}

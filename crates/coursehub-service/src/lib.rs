//! # coursehub-service
//!
//! Business logic service layer for CourseHub. Each service orchestrates
//! the relational stores, the blob store and the access policy to implement
//! one group of use cases.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod folder;
pub mod submission;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use file::{BlobReplacer, DownloadService, FileService, PathLocks, UploadService};
pub use folder::{FolderService, TreeNode, TreeService};
pub use submission::SubmissionService;

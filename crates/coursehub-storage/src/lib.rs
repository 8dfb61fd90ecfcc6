//! # coursehub-storage
//!
//! Blob store providers for CourseHub (local filesystem, process memory and
//! S3-compatible object stores), the deterministic object path layout, and
//! the signer used for provider-independent download links.

pub mod factory;
pub mod paths;
pub mod providers;
pub mod signer;

pub use factory::{build_blob_store, build_signer};
pub use paths::BlobPath;
pub use signer::UrlSigner;

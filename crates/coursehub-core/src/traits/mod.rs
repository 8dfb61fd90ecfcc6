//! Core traits defined in `coursehub-core` and implemented by other crates.

pub mod storage;

pub use storage::{BlobMeta, BlobStore, ByteStream, SignedUrl};

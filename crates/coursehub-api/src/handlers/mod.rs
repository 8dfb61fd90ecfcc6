//! HTTP request handlers, one module per resource.

pub mod blobs;
pub mod files;
pub mod health;
pub mod materials;
pub mod submission;

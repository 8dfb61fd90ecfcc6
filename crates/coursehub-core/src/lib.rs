//! # coursehub-core
//!
//! Core crate for CourseHub. Contains the blob store trait, configuration
//! schemas and the unified error system.
//!
//! This crate has **no** internal dependencies on other CourseHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;

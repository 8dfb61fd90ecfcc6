//! # coursehub-api
//!
//! HTTP API layer for CourseHub built on Axum.
//!
//! Provides the course materials, submission and download endpoints,
//! middleware (CORS, request logging), the bearer-token extractor, DTOs and
//! the mapping from [`coursehub_core::AppError`] to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;

//! Assignment and submission entities.

pub mod model;

pub use model::{Assignment, CreateSubmission, Submission};

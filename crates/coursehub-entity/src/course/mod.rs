//! Course and enrollment entities.

pub mod model;

pub use model::{Course, Enrollment};

//! # coursehub-entity
//!
//! Domain entity models for CourseHub. Every struct in this crate
//! represents a database table row or a domain value object. Row types
//! additionally derive `sqlx::FromRow`.

pub mod assignment;
pub mod course;
pub mod file;
pub mod folder;
pub mod user;

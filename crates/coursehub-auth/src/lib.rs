//! # coursehub-auth
//!
//! Caller identity and authorization for CourseHub.
//!
//! ## Modules
//!
//! - `jwt`: bearer token claims, issuance and validation
//! - `identity`: the authenticated caller passed to services
//! - `policy`: role, ownership and enrollment checks against courses

pub mod identity;
pub mod jwt;
pub mod policy;

pub use identity::Identity;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use policy::AccessPolicy;

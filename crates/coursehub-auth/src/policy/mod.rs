//! Course-scoped access policy.

pub mod enforcer;

pub use enforcer::AccessPolicy;

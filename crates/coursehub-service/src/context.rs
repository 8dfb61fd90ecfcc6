//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};

use coursehub_auth::Identity;
use coursehub_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built by the API layer from the bearer token and passed into service
/// methods so that every operation knows *who* is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated caller.
    pub identity: Identity,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            request_time: Utc::now(),
        }
    }

    /// The caller's user ID.
    pub fn user_id(&self) -> i64 {
        self.identity.user_id
    }

    /// The caller's role.
    pub fn role(&self) -> UserRole {
        self.identity.role
    }
}

//! Server-side session lookup.
//!
//! Sessions are created by the login flow, which lives outside this service.
//! This module only resolves a session id (from the session cookie) to the
//! integer user identity stored in the session record.
//!
//! # Components
//!
//! - `SessionStore` - Lookup trait (enables mocking)
//! - `redis` - Redis-backed implementation used in production

pub mod redis;

use crate::errors::ApiError;
use serde::Deserialize;

pub use self::redis::RedisSessionStore;

/// Longest session id that will be looked up.
pub const MAX_SESSION_ID_LEN: usize = 256;

/// Trait for session lookups.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Resolve `session_id` to the user identity stored in the session.
    ///
    /// Returns `Ok(None)` for unknown sessions and for sessions that carry no
    /// user identity.
    async fn find_user_id(&self, session_id: &str) -> Result<Option<i64>, ApiError>;
}

/// The part of a stored session record this service reads.
///
/// Records written by the login flow carry more fields (cookie metadata,
/// flash messages); they are ignored.
#[derive(Debug, Deserialize)]
struct SessionRecord {
    #[serde(rename = "userId", default)]
    user_id: Option<i64>,
}

/// Extract the user identity from a raw session record.
///
/// Malformed records are treated as carrying no identity.
pub(crate) fn parse_session_record(raw: &str) -> Option<i64> {
    match serde_json::from_str::<SessionRecord>(raw) {
        Ok(record) => record.user_id,
        Err(e) => {
            tracing::warn!(target: "ca.sessions", error = %e, "Ignoring malformed session record");
            None
        }
    }
}

/// Whether `session_id` is worth looking up at all.
pub(crate) fn is_plausible_session_id(session_id: &str) -> bool {
    !session_id.is_empty() && session_id.len() <= MAX_SESSION_ID_LEN
}

//! Campaign API models.
//!
//! Request-context values inserted by the gates, response bodies, and rows
//! read by the repositories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Request context
// ============================================================================

/// Identity bound to the caller's server-side session.
///
/// Inserted into request extensions by `middleware::session::load_session`
/// when the session cookie resolves to a session with a user identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: i64,
}

/// Annotation produced by the Optional-Auth Gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub is_authenticated: bool,
}

impl AuthContext {
    /// Context derived from an optional session identity.
    pub fn from_session(identity: Option<SessionIdentity>) -> Self {
        match identity {
            Some(identity) => Self {
                user_id: Some(identity.user_id),
                is_authenticated: true,
            },
            None => Self {
                user_id: None,
                is_authenticated: false,
            },
        }
    }
}

// ============================================================================
// Operational responses
// ============================================================================

/// Liveness response returned by `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "OK" when the process is serving.
    pub status: String,

    /// RFC 3339 timestamp of the response.
    pub timestamp: String,

    /// Seconds since the router was built.
    pub uptime: f64,

    /// Deployment environment name.
    pub environment: String,
}

/// Static service metadata returned by `GET /api`.
#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

// ============================================================================
// Resources
// ============================================================================

/// Public profile of a user.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Message template.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub body: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// Campaign recipient.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Messaging tenant (sender account) owned by a user.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Response for `GET /api/templates`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateListResponse {
    pub viewer: AuthContext,
    pub templates: Vec<Template>,
}

//! Operational handlers.
//!
//! - `/api/health`: liveness probe, never touches a datastore
//! - `/api`: static service metadata

use crate::models::{HealthResponse, InfoResponse};
use crate::routes::AppState;
use axum::extract::State;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Mounted resource groups, as listed by `GET /api`.
pub const RESOURCE_PATHS: [(&str, &str); 5] = [
    ("users", "/api/users"),
    ("templates", "/api/templates"),
    ("contacts", "/api/contacts"),
    ("tenants", "/api/tenants"),
    ("health", "/api/health"),
];

/// Liveness probe handler.
///
/// Returns 200 whenever the process is serving. Does NOT check any
/// dependencies.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: state.started_at.elapsed().as_secs_f64(),
        environment: state.config.environment.clone(),
    })
}

/// Service metadata handler.
pub async fn api_info() -> Json<InfoResponse> {
    Json(InfoResponse {
        name: "Campaign API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: RESOURCE_PATHS.into_iter().collect::<BTreeMap<_, _>>(),
    })
}

//! Metrics definitions for the Campaign API.
//!
//! All metrics follow Prometheus naming conventions:
//! - `ca_` prefix for Campaign API
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded to prevent cardinality explosion:
//! - `method`: HTTP methods
//! - `endpoint`: mounted route shapes with `:id` placeholders, everything else `/other`
//! - `status`: 3 values (success, error, timeout)
//! - `reason`: bounded by the gates (missing_token, invalid_token, not_owner)
//! - `operation`: bounded by the repositories (get_user, list_templates, ...)

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize the Prometheus metrics recorder and return the handle
/// for serving metrics via HTTP.
///
/// Must be called before any metrics are recorded.
///
/// # Errors
///
/// Returns error if the Prometheus recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("ca_http_request".to_string()),
            &[
                0.005, 0.010, 0.025, 0.050, 0.100, 0.150, 0.200, 0.300, 0.500, 1.000, 2.000,
            ],
        )
        .map_err(|e| format!("Failed to set HTTP request buckets: {e}"))?
        .set_buckets_for_metric(
            Matcher::Prefix("ca_db_query".to_string()),
            &[
                0.001, 0.002, 0.005, 0.010, 0.020, 0.050, 0.100, 0.250, 0.500, 1.000,
            ],
        )
        .map_err(|e| format!("Failed to set DB query buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

// ============================================================================
// HTTP Request Metrics
// ============================================================================

/// Record HTTP request completion
///
/// Metric: `ca_http_requests_total`, `ca_http_request_duration_seconds`
/// Labels: `method`, `endpoint`, `status` / `status_code`
pub fn record_http_request(method: &str, endpoint: &str, status_code: u16, duration: Duration) {
    let normalized_endpoint = normalize_endpoint(endpoint);
    let status = categorize_status_code(status_code);

    histogram!("ca_http_request_duration_seconds",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint.clone(),
        "status" => status
    )
    .record(duration.as_secs_f64());

    counter!("ca_http_requests_total",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint,
        "status_code" => status_code.to_string()
    )
    .increment(1);
}

/// Categorize HTTP status code into success/error/timeout
fn categorize_status_code(status_code: u16) -> &'static str {
    match status_code {
        200..=299 => "success",
        408 | 504 => "timeout",
        _ => "error",
    }
}

/// Normalize endpoint path to prevent label cardinality explosion.
///
/// Known static paths pass through; identity segments of the mounted
/// resource routes become `:id`. Anything else is `/other`.
pub(crate) fn normalize_endpoint(path: &str) -> String {
    // Known static paths
    match path {
        "/" | "/api" | "/api/health" | "/api/users/me" | "/api/templates" | "/metrics" => {
            path.to_string()
        }
        _ => normalize_dynamic_endpoint(path),
    }
}

/// Normalize paths with an identity segment.
fn normalize_dynamic_endpoint(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').collect();

    match parts.as_slice() {
        // /api/users/{id}
        ["", "api", "users", id] if !id.is_empty() => "/api/users/:id".to_string(),

        // /api/{resource}/{scope}/{id}
        ["", "api", "contacts", "user", id] if !id.is_empty() => {
            "/api/contacts/user/:id".to_string()
        }
        ["", "api", "templates", "user", id] if !id.is_empty() => {
            "/api/templates/user/:id".to_string()
        }
        ["", "api", "tenants", "owner", id] if !id.is_empty() => {
            "/api/tenants/owner/:id".to_string()
        }

        // Unknown paths normalized to "/other" to bound cardinality
        _ => "/other".to_string(),
    }
}

// ============================================================================
// Gate Metrics
// ============================================================================

/// Record a request rejected by one of the gates
///
/// Metric: `ca_auth_rejections_total`
/// Labels: `reason`
pub fn record_auth_rejection(reason: &'static str) {
    counter!("ca_auth_rejections_total", "reason" => reason).increment(1);
}

// ============================================================================
// Database Metrics
// ============================================================================

/// Record database query duration and outcome
///
/// Metric: `ca_db_queries_total`, `ca_db_query_duration_seconds`
/// Labels: `operation`, `status`
pub fn record_db_query(operation: &'static str, status: &'static str, duration: Duration) {
    histogram!("ca_db_query_duration_seconds",
        "operation" => operation,
        "status" => status
    )
    .record(duration.as_secs_f64());

    counter!("ca_db_queries_total",
        "operation" => operation,
        "status" => status
    )
    .increment(1);
}

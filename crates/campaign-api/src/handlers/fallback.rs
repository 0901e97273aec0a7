//! Catch-all for unmatched routes.

use crate::errors::ApiError;
use axum::http::Uri;

/// Fallback handler: 404 `{"error": "Not Found", "message": "Route <path> not found"}`.
pub async fn not_found(uri: Uri) -> ApiError {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);
    ApiError::NotFound(format!("Route {target} not found"))
}

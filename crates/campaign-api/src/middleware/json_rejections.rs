//! JSON bodies for framework-generated rejections.
//!
//! Axum's method router, `RequestBodyLimitLayer` and `TimeoutLayer` answer
//! 405, 413 and 408 with empty or plain-text bodies. This layer rewrites
//! those into the `{error, message}` shape used by the 404 fallback.
//! Responses that already carry JSON are left alone.

use crate::errors::ErrorBody;
use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// Rewrite non-JSON 405, 408 and 413 responses as JSON.
pub async fn render_json_rejections(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let (error, message) = match response.status() {
        StatusCode::METHOD_NOT_ALLOWED => (
            "Method Not Allowed",
            format!("Method {method} not allowed on {path}"),
        ),
        StatusCode::REQUEST_TIMEOUT => ("Request Timeout", "Request timed out".to_string()),
        StatusCode::PAYLOAD_TOO_LARGE => (
            "Payload Too Large",
            "Request body exceeds the size limit".to_string(),
        ),
        _ => return response,
    };

    if is_json(&response) {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_TYPE);
    parts.headers.remove(header::CONTENT_LENGTH);

    let body = Json(ErrorBody {
        error,
        message,
        stack: None,
    });

    (parts, body).into_response()
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

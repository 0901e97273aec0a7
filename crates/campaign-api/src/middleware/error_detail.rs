//! Top-level error policy.
//!
//! Every internal failure renders as the same generic 500 body. Outside
//! development that is all the client sees. In development the
//! [`InternalErrorDetail`] carried by the response is folded back into the
//! body as `message` and `stack`.

use crate::errors::{internal_error_response, ErrorBody, InternalErrorDetail};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;
use std::sync::Arc;

/// State for [`expose_error_detail`].
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticsState {
    /// Whether 500 bodies include the underlying error.
    pub verbose_errors: bool,
}

/// Rewrite 500 responses to include their detail when verbose errors are on.
pub async fn expose_error_detail(
    State(state): State<Arc<DiagnosticsState>>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;

    if !state.verbose_errors || response.status() != StatusCode::INTERNAL_SERVER_ERROR {
        return response;
    }

    let Some(detail) = response.extensions().get::<InternalErrorDetail>().cloned() else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    let body = Json(ErrorBody {
        error: "Internal Server Error",
        message: detail.message,
        stack: Some(detail.stack),
    });

    (parts, body).into_response()
}

/// Panic handler for `CatchPanicLayer::custom`.
///
/// The panic payload becomes the error detail; the client body stays generic.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "Unknown panic payload".to_string()
    };

    tracing::error!(target: "ca.internal", panic = %message, "Handler panicked");

    internal_error_response(InternalErrorDetail {
        stack: format!("panic: {message}"),
        message,
    })
}

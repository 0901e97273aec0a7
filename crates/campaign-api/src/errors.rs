//! Campaign API error types.
//!
//! All errors map to HTTP status codes via the `IntoResponse` impl. Gate
//! failures carry fixed client messages. Internal failures are logged
//! server-side and rendered as a generic 500; their detail travels in an
//! [`InternalErrorDetail`] response extension so the error-detail middleware
//! can expose it in development only.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned when no credential was supplied.
pub const NO_TOKEN_MESSAGE: &str = "No token provided";

/// Message returned when a credential fails verification.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

/// Message returned when the ownership check fails.
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied";

/// Generic message for 500 responses.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong";

/// Campaign API error type.
///
/// Maps to HTTP status codes:
/// - Unauthenticated: 401 Unauthorized
/// - InvalidCredential, Forbidden: 403 Forbidden
/// - NotFound: 404 Not Found
/// - Database, SessionStore, Internal: 500 Internal Server Error
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No credential presented")]
    Unauthenticated,

    #[error("Credential failed verification")]
    InvalidCredential,

    #[error("Access to resource denied")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Session store error: {0}")]
    SessionStore(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Unauthenticated => 401,
            ApiError::InvalidCredential | ApiError::Forbidden => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Database(_) | ApiError::SessionStore(_) | ApiError::Internal(_) => 500,
        }
    }
}

/// Detail of an internal failure, carried as a response extension.
///
/// Never serialized by default. See `middleware::error_detail`.
#[derive(Debug, Clone)]
pub struct InternalErrorDetail {
    /// Display form of the error.
    pub message: String,
    /// Debug form of the error, including its variant.
    pub stack: String,
}

/// `{message}` body for gate failures.
#[derive(Serialize)]
struct GateErrorBody {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

/// `{error, message, stack?}` body for 404 and 500 responses.
#[derive(Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: &'static str,
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) stack: Option<String>,
}

/// Build the generic 500 response with detail attached as an extension.
pub(crate) fn internal_error_response(detail: InternalErrorDetail) -> Response {
    let body = ErrorBody {
        error: "Internal Server Error",
        message: INTERNAL_ERROR_MESSAGE.to_string(),
        stack: None,
    };
    let mut response = (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    response.extensions_mut().insert(detail);
    response
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Unauthenticated => {
                let mut response = (
                    StatusCode::UNAUTHORIZED,
                    Json(GateErrorBody {
                        message: NO_TOKEN_MESSAGE,
                        code: None,
                    }),
                )
                    .into_response();
                response.headers_mut().insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static("Bearer realm=\"campaign-api\""),
                );
                response
            }
            ApiError::InvalidCredential => (
                StatusCode::FORBIDDEN,
                Json(GateErrorBody {
                    message: INVALID_TOKEN_MESSAGE,
                    code: None,
                }),
            )
                .into_response(),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(GateErrorBody {
                    message: ACCESS_DENIED_MESSAGE,
                    code: Some("FORBIDDEN"),
                }),
            )
                .into_response(),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: "Not Found",
                    message: message.clone(),
                    stack: None,
                }),
            )
                .into_response(),
            ApiError::Database(err) => {
                // Log actual error server-side, return generic message to client
                tracing::error!(target: "ca.database", error = %err, "Database operation failed");
                internal_error_response(self.detail())
            }
            ApiError::SessionStore(err) => {
                tracing::error!(target: "ca.sessions", error = %err, "Session lookup failed");
                internal_error_response(self.detail())
            }
            ApiError::Internal(err) => {
                tracing::error!(target: "ca.internal", error = %err, "Unhandled internal error");
                internal_error_response(self.detail())
            }
        }
    }
}

impl ApiError {
    fn detail(&self) -> InternalErrorDetail {
        InternalErrorDetail {
            message: self.to_string(),
            stack: format!("{:?}", self),
        }
    }
}

/// Convert sqlx errors to ApiError
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err.to_string())
    }
}

/// Convert redis errors to ApiError
impl From<redis::RedisError> for ApiError {
    fn from(err: redis::RedisError) -> Self {
        ApiError::SessionStore(err.to_string())
    }
}

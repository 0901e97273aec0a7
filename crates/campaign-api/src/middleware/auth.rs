//! Auth Gate.
//!
//! Extracts the access token from the configured transport, verifies it, and
//! injects the claims into request extensions. Requests without a token are
//! rejected with 401; requests with a token that fails verification with 403.
//! In both cases the downstream handler is not invoked.

use crate::auth::{Claims, TokenVerifier};
use crate::config::TokenSource;
use crate::errors::ApiError;
use crate::observability::metrics::record_auth_rejection;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::instrument;

/// Cookie carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// State for the Auth Gate.
#[derive(Clone)]
pub struct AuthState {
    /// Verifier holding the shared secret.
    pub verifier: Arc<TokenVerifier>,

    /// Transport the token is read from.
    pub token_source: TokenSource,
}

/// Pull the raw token out of the request, if one was supplied.
///
/// Only the configured transport is consulted. An `Authorization` header
/// that is not a non-empty Bearer credential counts as no token.
fn extract_token(source: TokenSource, jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    match source {
        TokenSource::Cookie => jar
            .get(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty()),
        TokenSource::AuthorizationHeader => headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(ToString::to_string),
    }
}

/// Auth Gate middleware.
///
/// # Response
///
/// - 401 `{"message": "No token provided"}` when no token is present
/// - 403 `{"message": "Invalid token"}` when verification fails
/// - Otherwise continues with [`Claims`] in request extensions
#[instrument(skip_all, name = "ca.middleware.auth")]
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(state.token_source, &jar, req.headers()).ok_or_else(|| {
        tracing::debug!(target: "ca.middleware.auth", "No access token presented");
        record_auth_rejection("missing_token");
        ApiError::Unauthenticated
    })?;

    let claims = state.verifier.verify(&token).map_err(|e| {
        record_auth_rejection("invalid_token");
        e
    })?;

    // Store claims in request extensions for downstream handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Extension trait for extracting claims from a request.
pub trait ClaimsExt {
    /// Get the verified claims from request extensions.
    ///
    /// Returns `None` if the Auth Gate was not applied to this request.
    fn claims(&self) -> Option<&Claims>;
}

impl<B> ClaimsExt for axum::extract::Request<B> {
    fn claims(&self) -> Option<&Claims> {
        self.extensions().get::<Claims>()
    }
}

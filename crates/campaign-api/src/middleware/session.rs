//! Session loading middleware.
//!
//! Resolves the session cookie to a [`SessionIdentity`] ahead of the
//! Ownership and Optional-Auth gates, which only read request extensions.
//! Routes without those gates never consult the session store.
//!
//! The cookie value is used as the session id as-is. Signed cookies (for
//! example `s:<sid>.<signature>`) are not unwrapped, so the issuer must set
//! an unsigned id.

use crate::errors::ApiError;
use crate::models::SessionIdentity;
use crate::sessions::SessionStore;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::instrument;

/// State for [`load_session`].
#[derive(Clone)]
pub struct SessionState {
    pub store: Arc<dyn SessionStore>,
    pub cookie_name: String,
}

/// Look up the caller's session and attach its identity, if any.
///
/// Requests without a session cookie, or whose session is unknown or carries
/// no identity, continue anonymously. A store failure renders as 500.
#[instrument(skip_all, name = "ca.middleware.session")]
pub async fn load_session(
    State(state): State<Arc<SessionState>>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session_id = jar
        .get(&state.cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty());

    if let Some(session_id) = session_id {
        match state.store.find_user_id(&session_id).await? {
            Some(user_id) => {
                req.extensions_mut().insert(SessionIdentity { user_id });
            }
            None => {
                tracing::debug!(target: "ca.middleware.session", "Session cookie did not resolve to an identity");
            }
        }
    }

    Ok(next.run(req).await)
}

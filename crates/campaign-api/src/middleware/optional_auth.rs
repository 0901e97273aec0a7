//! Optional-Auth Gate.
//!
//! Annotates every request with an [`AuthContext`] derived from the session
//! identity and always continues. Applying it more than once yields the same
//! annotation, since the context is recomputed from the session each time.

use crate::models::{AuthContext, SessionIdentity};
use axum::{extract::Request, middleware::Next, response::Response};
use tracing::instrument;

/// Optional-Auth Gate middleware. Never rejects.
#[instrument(skip_all, name = "ca.middleware.optional_auth")]
pub async fn annotate_auth_context(mut req: Request, next: Next) -> Response {
    let identity = req.extensions().get::<SessionIdentity>().copied();
    let context = AuthContext::from_session(identity);

    tracing::trace!(
        target: "ca.middleware.optional_auth",
        authenticated = context.is_authenticated,
        "Annotated request"
    );

    req.extensions_mut().insert(context);
    next.run(req).await
}

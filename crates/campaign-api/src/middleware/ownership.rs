//! Ownership Gate.
//!
//! Compares the identity bound to the caller's session with the identity the
//! request path names. Strict equality; there is no role-based override.

use crate::errors::ApiError;
use crate::models::SessionIdentity;
use crate::observability::metrics::record_auth_rejection;
use axum::{
    extract::{Path, Request},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use tracing::instrument;

/// Path parameters naming the owning identity, in lookup order.
const OWNER_PARAMS: [&str; 2] = ["userId", "id"];

/// Resource identity named by the path, if it parses as an integer.
fn resource_identity(params: &HashMap<String, String>) -> Option<i64> {
    OWNER_PARAMS
        .iter()
        .find_map(|name| params.get(*name))
        .and_then(|raw| raw.parse::<i64>().ok())
}

/// Ownership Gate middleware.
///
/// Must be attached with `route_layer` so path parameters are available.
/// Fails closed: a missing session, a missing parameter and a non-numeric
/// parameter all reject with 403 `{"message": "Access denied", "code": "FORBIDDEN"}`.
#[instrument(skip_all, name = "ca.middleware.ownership")]
pub async fn require_ownership(
    params: Option<Path<HashMap<String, String>>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let resource_id = params.and_then(|Path(params)| resource_identity(&params));
    let session_id = req
        .extensions()
        .get::<SessionIdentity>()
        .map(|identity| identity.user_id);

    match (resource_id, session_id) {
        (Some(resource_id), Some(session_id)) if resource_id == session_id => {
            Ok(next.run(req).await)
        }
        (resource_id, session_id) => {
            tracing::debug!(
                target: "ca.middleware.ownership",
                resource_id = ?resource_id,
                has_session = session_id.is_some(),
                "Ownership check failed"
            );
            record_auth_rejection("not_owner");
            Err(ApiError::Forbidden)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use http_body_util::BodyExt;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tower::ServiceExt;

    /// Routes guarded by the gate, with an optional session injected outside it.
    fn app(session: Option<i64>, calls: Arc<AtomicUsize>) -> Router {
        let handler = move || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                "ok"
            }
        };

        Router::new()
            .route("/users/:userId", get(handler.clone()))
            .route("/tenants/:id", get(handler.clone()))
            .route("/open", get(handler))
            .route_layer(middleware::from_fn(require_ownership))
            .layer(middleware::from_fn(move |mut req: Request, next: Next| async move {
                if let Some(user_id) = session {
                    req.extensions_mut().insert(SessionIdentity { user_id });
                }
                next.run(req).await
            }))
    }

    async fn get_status(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(HttpRequest::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_equal_identities_call_downstream_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (status, _) = get_status(app(Some(42), calls.clone()), "/users/42").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_mismatched_identities_are_forbidden() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (status, body) = get_status(app(Some(7), calls.clone()), "/users/42").await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "message": "Access denied", "code": "FORBIDDEN" })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_session_is_forbidden() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (status, _) = get_status(app(None, calls.clone()), "/users/42").await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_back_to_id_parameter() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (status, _) = get_status(app(Some(5), calls.clone()), "/tenants/5").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_numeric_parameter_is_forbidden() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (status, _) = get_status(app(Some(42), calls.clone()), "/users/abc").await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_route_without_identity_parameter_is_forbidden() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (status, _) = get_status(app(Some(42), calls.clone()), "/open").await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_resource_identity_prefers_user_id() {
        let params = HashMap::from([
            ("userId".to_string(), "1".to_string()),
            ("id".to_string(), "2".to_string()),
        ]);
        assert_eq!(resource_identity(&params), Some(1));
    }

    #[test]
    fn test_resource_identity_accepts_negative_and_rejects_overflow() {
        let negative = HashMap::from([("id".to_string(), "-3".to_string())]);
        assert_eq!(resource_identity(&negative), Some(-3));

        let overflow = HashMap::from([("id".to_string(), "99999999999999999999".to_string())]);
        assert_eq!(resource_identity(&overflow), None);
    }
}

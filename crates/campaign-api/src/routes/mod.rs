//! HTTP routes for the Campaign API.
//!
//! Defines the Axum router and application state.

use crate::auth::TokenVerifier;
use crate::config::Config;
use crate::handlers;
use crate::middleware::auth::{require_auth, AuthState};
use crate::middleware::error_detail::{expose_error_detail, handle_panic, DiagnosticsState};
use crate::middleware::http_metrics::http_metrics_middleware;
use crate::middleware::json_rejections::render_json_rejections;
use crate::middleware::optional_auth::annotate_auth_context;
use crate::middleware::ownership::require_ownership;
use crate::middleware::security::{cors_layer, with_security_headers};
use crate::middleware::session::{load_session, SessionState};
use crate::sessions::SessionStore;
use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::{
    catch_panic::CatchPanicLayer,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: PgPool,

    /// Service configuration.
    pub config: Config,

    /// Session lookups for the Ownership and Optional-Auth gates.
    pub sessions: Arc<dyn SessionStore>,

    /// Access token verifier for the Auth Gate.
    pub verifier: Arc<TokenVerifier>,

    /// When the router was built; reported as uptime.
    pub started_at: Instant,
}

impl AppState {
    /// Assemble state from its parts, building the verifier from `config`.
    pub fn new(pool: PgPool, config: Config, sessions: Arc<dyn SessionStore>) -> Self {
        let verifier = Arc::new(TokenVerifier::new(
            &config.jwt_secret,
            config.jwt_clock_skew_seconds,
        ));

        Self {
            pool,
            config,
            sessions,
            verifier,
            started_at: Instant::now(),
        }
    }
}

/// Build the application routes.
///
/// | Route | Gates |
/// |-------|-------|
/// | `GET /api`, `GET /api/health`, `GET /metrics` | none |
/// | `GET /api/users/me` | Auth |
/// | `GET /api/users/:userId` | Auth, Ownership |
/// | `GET /api/contacts/user/:userId` | Auth, Ownership |
/// | `GET /api/tenants/owner/:id` | Auth, Ownership |
/// | `GET /api/templates/user/:userId` | Ownership |
/// | `GET /api/templates` | Optional-Auth |
///
/// Only the Ownership and Optional-Auth groups consult the session store.
/// Unmatched paths fall through to a JSON 404; 405, 408 and 413 rejections
/// are rendered as JSON too.
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let config = &state.config;

    let auth_state = Arc::new(AuthState {
        verifier: state.verifier.clone(),
        token_source: config.token_source,
    });
    let session_state = Arc::new(SessionState {
        store: state.sessions.clone(),
        cookie_name: config.session_cookie_name.clone(),
    });
    let diagnostics = Arc::new(DiagnosticsState {
        verbose_errors: config.is_development(),
    });

    // Public routes (no gates)
    let public_routes = Router::new()
        .route("/api", get(handlers::api_info))
        .route("/api/health", get(handlers::health_check));

    // Auth Gate only
    let authenticated_routes = Router::new()
        .route("/api/users/me", get(handlers::get_me))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            require_auth,
        ));

    // Auth Gate, session loading, then Ownership Gate. The last route_layer
    // runs first.
    let owned_routes = Router::new()
        .route("/api/users/:userId", get(handlers::get_user))
        .route("/api/contacts/user/:userId", get(handlers::list_user_contacts))
        .route("/api/tenants/owner/:id", get(handlers::list_owner_tenants))
        .route_layer(middleware::from_fn(require_ownership))
        .route_layer(middleware::from_fn_with_state(
            session_state.clone(),
            load_session,
        ))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth));

    // Ownership Gate only
    let session_owned_routes = Router::new()
        .route(
            "/api/templates/user/:userId",
            get(handlers::list_user_templates),
        )
        .route_layer(middleware::from_fn(require_ownership))
        .route_layer(middleware::from_fn_with_state(
            session_state.clone(),
            load_session,
        ));

    // Optional-Auth Gate
    let optional_auth_routes = Router::new()
        .route("/api/templates", get(handlers::list_templates))
        .route_layer(middleware::from_fn(annotate_auth_context))
        .route_layer(middleware::from_fn_with_state(session_state, load_session));

    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    // Layer order (outermost first):
    // http metrics, CORS, security headers, trace, error detail,
    // JSON rejections, catch panic, body limits, timeout, routes.
    // Session loading is a route layer on the groups that read it.
    let router = public_routes
        .merge(authenticated_routes)
        .merge(owned_routes)
        .merge(session_owned_routes)
        .merge(optional_auth_routes)
        .with_state(state.clone())
        .merge(metrics_routes)
        .fallback(handlers::not_found)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(render_json_rejections))
        .layer(middleware::from_fn_with_state(
            diagnostics,
            expose_error_detail,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(())
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    with_security_headers(router)
        .layer(cors_layer(&config.allowed_origins))
        .layer(middleware::from_fn(http_metrics_middleware))
}

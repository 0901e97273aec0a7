//! Observability for the Campaign API.
//!
//! Provides metrics definitions and recording helpers. Request logging is
//! handled by `tower_http::trace` in the router.

pub mod metrics;

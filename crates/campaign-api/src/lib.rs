//! Campaign API Service Library
//!
//! REST backend for the messaging-campaign product: users, templates,
//! contacts and tenants, fronted by three request gates.
//!
//! # Gates
//!
//! - Auth Gate - verifies the HS256 access token, rejects with 401/403
//! - Ownership Gate - session identity must equal the identity in the path
//! - Optional-Auth Gate - annotates the request, never rejects
//!
//! # Architecture
//!
//! ```text
//! routes/mod.rs -> middleware/*.rs -> handlers/*.rs -> repositories/*.rs
//! ```
//!
//! # Modules
//!
//! - `auth` - Token claims and verification
//! - `config` - Service configuration from environment
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `middleware` - Gates and cross-cutting layers
//! - `models` - Request context, responses and rows
//! - `observability` - Prometheus metrics
//! - `repositories` - Read-only PostgreSQL access
//! - `routes` - Axum router setup
//! - `server` - Listener lifecycle and bounded shutdown drain
//! - `sessions` - Session store seam and Redis implementation
//! - `startup` - Datastore connections and schema initialization

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod server;
pub mod sessions;
pub mod startup;

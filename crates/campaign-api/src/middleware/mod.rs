//! Middleware for the Campaign API.
//!
//! # Gates
//!
//! - `auth` - Auth Gate, verifies the access token
//! - `ownership` - Ownership Gate, session identity must equal the path identity
//! - `optional_auth` - Optional-Auth Gate, annotates and never rejects
//!
//! # Cross-cutting
//!
//! - `session` - resolves the session cookie for the gates that read it
//! - `error_detail` - generic 500 policy and panic handler
//! - `json_rejections` - JSON bodies for 405, 408 and 413
//! - `security` - CORS allow-list and security headers
//! - `http_metrics` - request counters and latency histograms

pub mod auth;
pub mod error_detail;
pub mod http_metrics;
pub mod json_rejections;
pub mod optional_auth;
pub mod ownership;
pub mod security;
pub mod session;

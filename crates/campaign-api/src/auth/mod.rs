//! Access token handling.
//!
//! # Components
//!
//! - `claims` - Typed claims of a verified access token
//! - `verifier` - HS256 verification against the shared secret

pub mod claims;
pub mod verifier;

pub use claims::Claims;
pub use verifier::TokenVerifier;

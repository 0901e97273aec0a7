//! # Campaign Test Utilities
//!
//! Shared test utilities for the Campaign API.
//!
//! This crate provides:
//! - Token builder signing HS256 access tokens (`TestTokenBuilder`)
//! - In-memory session store (`InMemorySessionStore`)
//! - Server test harness (`TestApiServer` for E2E tests)
//!
//! None of it needs a live PostgreSQL or Redis.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use campaign_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let server = TestApiServer::spawn().await?;
//!     server.sessions().insert("sid-42", 42);
//!
//!     let token = TestTokenBuilder::new().for_user(42).sign(TEST_JWT_SECRET);
//!     let response = reqwest::Client::new()
//!         .get(format!("{}/api/users/me", server.url()))
//!         .header("Cookie", format!("accessToken={token}; sid=sid-42"))
//!         .send()
//!         .await?;
//!
//!     assert_eq!(response.status(), 200);
//!     Ok(())
//! }
//! ```

pub mod server_harness;
pub mod sessions;
pub mod token_builders;

// Re-export commonly used items
pub use server_harness::*;
pub use sessions::*;
pub use token_builders::*;

//! Builder for test access tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;

/// Shared secret the test server is configured with.
pub const TEST_JWT_SECRET: &str = "campaign-test-jwt-secret";

/// Builder for HS256 access tokens.
///
/// # Example
/// ```rust,ignore
/// let token = TestTokenBuilder::new()
///     .for_user(42)
///     .with_role(2)
///     .expires_in(3600)
///     .sign(TEST_JWT_SECRET);
/// ```
pub struct TestTokenBuilder {
    user_id: i64,
    role_id: i64,
    name: String,
    exp: i64,
    iat: i64,
    extra: Option<(String, serde_json::Value)>,
}

impl TestTokenBuilder {
    /// Create a new token builder with defaults (user 1, valid for an hour).
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            user_id: 1,
            role_id: 1,
            name: "Test User".to_string(),
            exp: (now + Duration::seconds(3600)).timestamp(),
            iat: now.timestamp(),
            extra: None,
        }
    }

    /// Set the subject identity.
    pub fn for_user(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }

    /// Set the role identity.
    pub fn with_role(mut self, role_id: i64) -> Self {
        self.role_id = role_id;
        self
    }

    /// Set the display name.
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set expiration in seconds from now (negative for an expired token).
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.exp = (Utc::now() + Duration::seconds(seconds)).timestamp();
        self
    }

    /// Set issued-at timestamp.
    pub fn issued_at(mut self, timestamp: i64) -> Self {
        self.iat = timestamp;
        self
    }

    /// Add a claim the service does not recognize.
    pub fn with_extra_claim(mut self, name: &str, value: serde_json::Value) -> Self {
        self.extra = Some((name.to_string(), value));
        self
    }

    /// Build the claims as a JSON value.
    pub fn build(self) -> serde_json::Value {
        let mut claims = json!({
            "userId": self.user_id,
            "roleId": self.role_id,
            "name": self.name,
            "exp": self.exp,
            "iat": self.iat,
        });
        if let Some((name, value)) = self.extra {
            claims[name] = value;
        }
        claims
    }

    /// Build and sign the claims with `secret`.
    pub fn sign(self, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &self.build(),
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("HS256 signing with an in-memory key cannot fail")
    }
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

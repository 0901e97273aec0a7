//! Access token verification.
//!
//! Tokens are HS256 JWTs signed with the shared `JWT_SECRET`.
//!
//! # Security
//!
//! - Size and shape are checked BEFORE any decoding (DoS prevention)
//! - Only HS256 is accepted; `alg` substitution fails verification
//! - `exp` is required and checked with the configured leeway
//! - `iat`, when present, may not lie further in the future than the leeway
//! - Every failure maps to the same `InvalidCredential` error

use crate::auth::claims::Claims;
use crate::errors::ApiError;
use common::jwt::{check_token_shape, validate_iat};
use common::secret::{ExposeSecret, SecretString};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::time::Duration;
use tracing::instrument;

/// Verifies access tokens against the shared secret.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    clock_skew: Duration,
}

impl TokenVerifier {
    /// Create a verifier for `secret`, tolerating `clock_skew_seconds` of drift.
    pub fn new(secret: &SecretString, clock_skew_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.expose_secret().as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = clock_skew_seconds;

        Self {
            decoding_key,
            validation,
            clock_skew: Duration::from_secs(clock_skew_seconds),
        }
    }

    /// Verify `token` and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidCredential` for every failure: oversized or
    /// malformed token, bad signature, wrong algorithm, expired, claims that do
    /// not match [`Claims`] exactly, or `iat` in the future.
    #[instrument(skip_all, name = "ca.auth.verify")]
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        check_token_shape(token).map_err(|e| {
            tracing::debug!(target: "ca.auth.verifier", error = ?e, "Token shape check failed");
            ApiError::InvalidCredential
        })?;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!(target: "ca.auth.verifier", error = %e, "Token verification failed");
                ApiError::InvalidCredential
            })?;

        if let Some(iat) = token_data.claims.iat {
            validate_iat(iat, self.clock_skew).map_err(|e| {
                tracing::debug!(target: "ca.auth.verifier", error = ?e, "Token iat validation failed");
                ApiError::InvalidCredential
            })?;
        }

        tracing::debug!(target: "ca.auth.verifier", "Token verified successfully");
        Ok(token_data.claims)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::jwt::MAX_JWT_SIZE_BYTES;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "unit-test-secret";

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(&SecretString::from(SECRET), 60)
    }

    fn claims_json(exp_offset: i64) -> serde_json::Value {
        let now = Utc::now().timestamp();
        serde_json::json!({
            "userId": 42,
            "roleId": 3,
            "name": "Grace Hopper",
            "exp": now + exp_offset,
            "iat": now,
        })
    }

    fn sign(payload: &serde_json::Value, secret: &str, alg: Algorithm) -> String {
        encode(
            &Header::new(alg),
            payload,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_returns_exact_claims() {
        let payload = claims_json(3600);
        let token = sign(&payload, SECRET, Algorithm::HS256);

        let claims = verifier().verify(&token).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.role_id, 3);
        assert_eq!(claims.name, "Grace Hopper");
        assert_eq!(serde_json::to_value(&claims).unwrap(), payload);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let token = sign(&claims_json(3600), "someone-elses-secret", Algorithm::HS256);

        let result = verifier().verify(&token);
        assert!(matches!(result, Err(ApiError::InvalidCredential)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = sign(&claims_json(-3600), SECRET, Algorithm::HS256);

        let result = verifier().verify(&token);
        assert!(matches!(result, Err(ApiError::InvalidCredential)));
    }

    #[test]
    fn test_expiry_within_leeway_is_accepted() {
        let token = sign(&claims_json(-30), SECRET, Algorithm::HS256);

        assert!(verifier().verify(&token).is_ok());
    }

    #[test]
    fn test_other_algorithm_is_rejected() {
        let token = sign(&claims_json(3600), SECRET, Algorithm::HS512);

        let result = verifier().verify(&token);
        assert!(matches!(result, Err(ApiError::InvalidCredential)));
    }

    #[test]
    fn test_token_without_exp_is_rejected() {
        let payload = serde_json::json!({ "userId": 42, "roleId": 3, "name": "x" });
        let token = sign(&payload, SECRET, Algorithm::HS256);

        let result = verifier().verify(&token);
        assert!(matches!(result, Err(ApiError::InvalidCredential)));
    }

    #[test]
    fn test_token_with_only_subject_is_rejected() {
        let exp = Utc::now().timestamp() + 3600;
        let payload = serde_json::json!({ "userId": 42, "exp": exp });
        let token = sign(&payload, SECRET, Algorithm::HS256);

        let result = verifier().verify(&token);
        assert!(matches!(result, Err(ApiError::InvalidCredential)));
    }

    #[test]
    fn test_token_with_unrecognized_claim_is_rejected() {
        let mut payload = claims_json(3600);
        payload["isAdmin"] = serde_json::json!(true);
        let token = sign(&payload, SECRET, Algorithm::HS256);

        let result = verifier().verify(&token);
        assert!(matches!(result, Err(ApiError::InvalidCredential)));
    }

    #[test]
    fn test_iat_in_the_future_is_rejected() {
        let mut payload = claims_json(7200);
        payload["iat"] = serde_json::json!(Utc::now().timestamp() + 3600);
        let token = sign(&payload, SECRET, Algorithm::HS256);

        let result = verifier().verify(&token);
        assert!(matches!(result, Err(ApiError::InvalidCredential)));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let v = verifier();
        for token in ["", "garbage", "a.b", "a.b.c", "!!!.###.$$$", "a..c"] {
            assert!(
                matches!(v.verify(token), Err(ApiError::InvalidCredential)),
                "token {:?} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_oversized_token_is_rejected() {
        let token = format!("{}.b.c", "a".repeat(MAX_JWT_SIZE_BYTES));

        let result = verifier().verify(&token);
        assert!(matches!(result, Err(ApiError::InvalidCredential)));
    }

    #[test]
    fn test_verification_is_deterministic() {
        let token = sign(&claims_json(3600), SECRET, Algorithm::HS256);
        let v = verifier();

        assert_eq!(v.verify(&token).unwrap(), v.verify(&token).unwrap());
    }
}

//! JWT limits and structural checks shared by token verifiers.
//!
//! These run BEFORE any signature work so that oversized or obviously
//! malformed credentials are rejected cheaply:
//! - Size limit for denial-of-service prevention
//! - Compact-serialization shape check (`header.payload.signature`)
//! - Clock skew bounds and `iat` validation
//!
//! # Usage
//!
//! ```rust,ignore
//! use common::jwt::{check_token_shape, validate_iat, DEFAULT_CLOCK_SKEW};
//!
//! check_token_shape(token)?;
//! // ... verify signature, decode claims ...
//! if let Some(iat) = claims.iat {
//!     validate_iat(iat, DEFAULT_CLOCK_SKEW)?;
//! }
//! ```

use std::time::Duration;
use thiserror::Error;

/// Maximum allowed JWT size in bytes (8KB).
///
/// Access tokens for this service carry three short claims plus `exp`/`iat`
/// and are well under 1KB. Anything above this limit is rejected before
/// base64 decoding or HMAC computation.
pub const MAX_JWT_SIZE_BYTES: usize = 8192;

/// Default leeway applied to `exp` and `iat` checks.
pub const DEFAULT_CLOCK_SKEW: Duration = Duration::from_secs(60);

/// Upper bound for configurable clock skew (10 minutes).
pub const MAX_CLOCK_SKEW: Duration = Duration::from_secs(600);

/// Errors from the pre-verification checks.
///
/// Messages are intentionally identical so callers cannot leak which check
/// failed. The specific reason is logged at debug level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtValidationError {
    /// Token size exceeds maximum allowed.
    #[error("The access token is invalid or expired")]
    TokenTooLarge,

    /// Token is not a three-segment compact JWT.
    #[error("The access token is invalid or expired")]
    MalformedToken,

    /// Token `iat` claim is too far in the future.
    #[error("The access token is invalid or expired")]
    IatTooFarInFuture,
}

/// Check size and compact-serialization shape of a token.
///
/// Does NOT verify the signature or decode any segment.
///
/// # Errors
///
/// - `TokenTooLarge` if the token exceeds [`MAX_JWT_SIZE_BYTES`]
/// - `MalformedToken` if the token is not three non-empty dot-separated segments
pub fn check_token_shape(token: &str) -> Result<(), JwtValidationError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(JwtValidationError::TokenTooLarge);
    }

    let mut segments = 0usize;
    for part in token.split('.') {
        segments += 1;
        if part.is_empty() {
            tracing::debug!(target: "common.jwt", "Token rejected: empty segment");
            return Err(JwtValidationError::MalformedToken);
        }
    }

    if segments != 3 {
        tracing::debug!(
            target: "common.jwt",
            segments = segments,
            "Token rejected: invalid JWT format"
        );
        return Err(JwtValidationError::MalformedToken);
    }

    Ok(())
}

/// Validate the `iat` (issued-at) claim with clock skew tolerance.
///
/// Rejects tokens issued more than `clock_skew` in the future.
///
/// # Errors
///
/// Returns `JwtValidationError::IatTooFarInFuture` if the check fails.
pub fn validate_iat(iat: i64, clock_skew: Duration) -> Result<(), JwtValidationError> {
    let now = chrono::Utc::now().timestamp();
    validate_iat_at(iat, clock_skew, now)
}

/// Deterministic `iat` validation against an explicit `now` timestamp.
pub(crate) fn validate_iat_at(
    iat: i64,
    clock_skew: Duration,
    now: i64,
) -> Result<(), JwtValidationError> {
    // Safe cast: clock_skew is bounded to MAX_CLOCK_SKEW (600 seconds)
    #[allow(clippy::cast_possible_wrap)]
    let clock_skew_secs = clock_skew.as_secs() as i64;
    let max_iat = now + clock_skew_secs;

    if iat > max_iat {
        tracing::debug!(
            target: "common.jwt",
            iat = iat,
            now = now,
            max_allowed = max_iat,
            "Token rejected: iat too far in the future"
        );
        return Err(JwtValidationError::IatTooFarInFuture);
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_accepts_three_segments() {
        assert_eq!(check_token_shape("aaa.bbb.ccc"), Ok(()));
    }

    #[test]
    fn test_shape_rejects_wrong_segment_count() {
        assert_eq!(
            check_token_shape("only.two"),
            Err(JwtValidationError::MalformedToken)
        );
        assert_eq!(
            check_token_shape("a.b.c.d"),
            Err(JwtValidationError::MalformedToken)
        );
        assert_eq!(
            check_token_shape("single"),
            Err(JwtValidationError::MalformedToken)
        );
    }

    #[test]
    fn test_shape_rejects_empty_segments() {
        assert_eq!(check_token_shape(""), Err(JwtValidationError::MalformedToken));
        assert_eq!(
            check_token_shape(".payload.sig"),
            Err(JwtValidationError::MalformedToken)
        );
        assert_eq!(
            check_token_shape("header..sig"),
            Err(JwtValidationError::MalformedToken)
        );
    }

    #[test]
    fn test_shape_size_boundary() {
        let at_limit = format!("{}.b.c", "a".repeat(MAX_JWT_SIZE_BYTES - 4));
        assert_eq!(at_limit.len(), MAX_JWT_SIZE_BYTES);
        assert_eq!(check_token_shape(&at_limit), Ok(()));

        let over_limit = format!("{}.b.c", "a".repeat(MAX_JWT_SIZE_BYTES - 3));
        assert_eq!(
            check_token_shape(&over_limit),
            Err(JwtValidationError::TokenTooLarge)
        );
    }

    #[test]
    fn test_iat_within_skew_is_accepted() {
        let now = 1_700_000_000;
        assert!(validate_iat_at(now, DEFAULT_CLOCK_SKEW, now).is_ok());
        assert!(validate_iat_at(now + 60, DEFAULT_CLOCK_SKEW, now).is_ok());
        assert!(validate_iat_at(now - 3600, DEFAULT_CLOCK_SKEW, now).is_ok());
    }

    #[test]
    fn test_iat_beyond_skew_is_rejected() {
        let now = 1_700_000_000;
        assert_eq!(
            validate_iat_at(now + 61, DEFAULT_CLOCK_SKEW, now),
            Err(JwtValidationError::IatTooFarInFuture)
        );
    }

    #[test]
    fn test_error_messages_are_generic() {
        let messages = [
            JwtValidationError::TokenTooLarge.to_string(),
            JwtValidationError::MalformedToken.to_string(),
            JwtValidationError::IatTooFarInFuture.to_string(),
        ];
        assert!(messages.iter().all(|m| m == "The access token is invalid or expired"));
    }

    #[test]
    fn test_clock_skew_bounds() {
        assert!(DEFAULT_CLOCK_SKEW <= MAX_CLOCK_SKEW);
        assert_eq!(MAX_CLOCK_SKEW.as_secs(), 600);
    }
}

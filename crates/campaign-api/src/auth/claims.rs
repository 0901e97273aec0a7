//! Access token claims.
//!
//! Claims are decoded into a closed, typed structure: unknown fields and
//! missing required fields are rejected during verification rather than
//! passed downstream as an untyped map.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verified claims of an access token.
///
/// The `name` field is personal data and is redacted in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Subject: the user's numeric identity.
    #[serde(rename = "userId")]
    pub user_id: i64,

    /// Role identity of the user.
    #[serde(rename = "roleId")]
    pub role_id: i64,

    /// Display name - redacted in Debug output.
    pub name: String,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,

    /// Issued-at timestamp (Unix epoch seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("user_id", &self.user_id)
            .field("role_id", &self.role_id)
            .field("name", &"[REDACTED]")
            .field("exp", &self.exp)
            .field("iat", &self.iat)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample() -> Claims {
        Claims {
            user_id: 42,
            role_id: 2,
            name: "Ada Lovelace".to_string(),
            exp: 1_900_000_000,
            iat: Some(1_800_000_000),
        }
    }

    #[test]
    fn test_claims_debug_redacts_name() {
        let debug_str = format!("{:?}", sample());

        assert!(!debug_str.contains("Ada Lovelace"));
        assert!(debug_str.contains("[REDACTED]"));
        assert!(debug_str.contains("user_id: 42"));
    }

    #[test]
    fn test_claims_wire_names() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["userId"], 42);
        assert_eq!(json["roleId"], 2);
        assert_eq!(json["name"], "Ada Lovelace");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_claims_without_iat_omits_field() {
        let mut claims = sample();
        claims.iat = None;

        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains("iat"));
    }

    #[test]
    fn test_claims_reject_unknown_fields() {
        let json = r#"{"userId":1,"roleId":1,"name":"x","exp":1,"isAdmin":true}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn test_claims_reject_missing_required_fields() {
        let json = r#"{"userId":1,"name":"x","exp":1}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn test_claims_reject_non_integer_subject() {
        let json = r#"{"userId":"42","roleId":1,"name":"x","exp":1}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }
}

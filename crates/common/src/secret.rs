//! Secret types for protecting sensitive values from accidental logging.
//!
//! Re-exports [`secrecy`] types. Use `SecretString` for the JWT signing
//! secret, datastore passwords, and raw bearer tokens once they leave the
//! request they arrived on.
//!
//! `SecretString` implements `Debug` with redaction, so a config struct that
//! derives or hand-writes `Debug` cannot print the secret by accident. The
//! value is zeroized on drop.
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! let secret = SecretString::from("signing-key");
//! assert!(!format!("{secret:?}").contains("signing-key"));
//! assert_eq!(secret.expose_secret(), "signing-key");
//! ```

pub use secrecy::{ExposeSecret, SecretString};

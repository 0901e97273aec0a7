//! Campaign API configuration.
//!
//! Configuration is loaded once from environment variables at startup and is
//! immutable afterwards. Datastore URLs are redacted in Debug output and the
//! JWT secret is held in a `SecretString`.

use axum::http::HeaderValue;
use common::jwt::{DEFAULT_CLOCK_SKEW, MAX_CLOCK_SKEW};
use common::secret::SecretString;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 3001;

/// Default bind host.
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// Default request body ceiling (10 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Default session cookie name.
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "sid";

/// Default Redis key prefix for session records.
pub const DEFAULT_SESSION_KEY_PREFIX: &str = "sess:";

/// Default bound on the shutdown drain, in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECONDS: u64 = 10;

/// Default environment name.
pub const DEFAULT_ENVIRONMENT: &str = "production";

/// Environment name that unlocks verbose error detail.
pub const DEVELOPMENT_ENVIRONMENT: &str = "development";

/// Frontend origins always present in the CORS allow-list.
///
/// `null` is what browsers send from `file://` pages and sandboxed iframes.
/// Allowing it is lax; it is kept so that locally opened campaign previews
/// can call the API.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
    "null",
];

/// Where the Auth Gate looks for the access token.
///
/// Exactly one transport is active per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// `accessToken` cookie.
    Cookie,
    /// `Authorization: Bearer <token>` header.
    AuthorizationHeader,
}

impl FromStr for TokenSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cookie" => Ok(TokenSource::Cookie),
            "header" | "bearer" => Ok(TokenSource::AuthorizationHeader),
            other => Err(ConfigError::InvalidTokenSource(format!(
                "AUTH_TOKEN_SOURCE must be 'cookie' or 'header', got '{}'",
                other
            ))),
        }
    }
}

/// Campaign API configuration.
#[derive(Clone)]
pub struct Config {
    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Redis connection URL for the session store.
    pub redis_url: String,

    /// Shared secret used to verify HS256 access tokens.
    pub jwt_secret: SecretString,

    /// Leeway in seconds for `exp`/`iat` checks.
    pub jwt_clock_skew_seconds: u64,

    /// Listen port (default: 3001).
    pub port: u16,

    /// Listen host (default: "0.0.0.0").
    pub bind_host: String,

    /// Deployment environment name (e.g. "production", "development").
    pub environment: String,

    /// Origins allowed by the CORS policy.
    pub allowed_origins: Vec<String>,

    /// Transport the Auth Gate reads the token from.
    pub token_source: TokenSource,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,

    /// Name of the cookie carrying the session id.
    pub session_cookie_name: String,

    /// Prefix of session keys in Redis.
    pub session_key_prefix: String,

    /// Upper bound on waiting for in-flight requests at shutdown.
    pub shutdown_timeout_seconds: u64,
}

/// Custom Debug implementation that redacts sensitive fields.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("jwt_secret", &self.jwt_secret)
            .field("jwt_clock_skew_seconds", &self.jwt_clock_skew_seconds)
            .field("port", &self.port)
            .field("bind_host", &self.bind_host)
            .field("environment", &self.environment)
            .field("allowed_origins", &self.allowed_origins)
            .field("token_source", &self.token_source)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_key_prefix", &self.session_key_prefix)
            .field("shutdown_timeout_seconds", &self.shutdown_timeout_seconds)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid JWT secret: {0}")]
    InvalidJwtSecret(String),

    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid JWT clock skew configuration: {0}")]
    InvalidJwtClockSkew(String),

    #[error("Invalid frontend URL: {0}")]
    InvalidFrontendUrl(String),

    #[error("Invalid token source: {0}")]
    InvalidTokenSource(String),

    #[error("Invalid body size limit: {0}")]
    InvalidBodyLimit(String),

    #[error("Invalid shutdown timeout: {0}")]
    InvalidShutdownTimeout(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = required(vars, "DATABASE_URL")?;
        let redis_url = required(vars, "REDIS_URL")?;

        // No fallback secret: a missing or blank JWT_SECRET aborts startup.
        let jwt_secret = vars
            .get("JWT_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::InvalidJwtSecret(
                "JWT_SECRET must not be empty".to_string(),
            ));
        }
        let jwt_secret = SecretString::from(jwt_secret.clone());

        let jwt_clock_skew_seconds = if let Some(value_str) = vars.get("JWT_CLOCK_SKEW_SECONDS") {
            let value: u64 = value_str.parse().map_err(|e| {
                ConfigError::InvalidJwtClockSkew(format!(
                    "JWT_CLOCK_SKEW_SECONDS must be a valid non-negative integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            if value > MAX_CLOCK_SKEW.as_secs() {
                return Err(ConfigError::InvalidJwtClockSkew(format!(
                    "JWT_CLOCK_SKEW_SECONDS must not exceed {} seconds, got {}",
                    MAX_CLOCK_SKEW.as_secs(),
                    value
                )));
            }

            value
        } else {
            DEFAULT_CLOCK_SKEW.as_secs()
        };

        let port = match vars.get("PORT") {
            Some(value_str) => value_str.parse::<u16>().map_err(|e| {
                ConfigError::InvalidPort(format!(
                    "PORT must be an integer between 0 and 65535, got '{}': {}",
                    value_str, e
                ))
            })?,
            None => DEFAULT_PORT,
        };

        let bind_host = vars
            .get("BIND_HOST")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_HOST.to_string());

        let environment = vars
            .get("NODE_ENV")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let mut allowed_origins: Vec<String> = DEFAULT_ALLOWED_ORIGINS
            .iter()
            .map(|o| o.to_string())
            .collect();
        if let Some(frontend_url) = vars.get("FRONTEND_URL").map(|v| v.trim()) {
            if !frontend_url.is_empty() {
                // Credentialed CORS cannot use a wildcard origin.
                if frontend_url == "*" {
                    return Err(ConfigError::InvalidFrontendUrl(
                        "FRONTEND_URL must be a concrete origin, not '*'".to_string(),
                    ));
                }
                // The origin is echoed back in a response header, so it must
                // be a valid header value.
                HeaderValue::from_str(frontend_url).map_err(|e| {
                    ConfigError::InvalidFrontendUrl(format!(
                        "FRONTEND_URL must be a valid origin, got '{}': {}",
                        frontend_url, e
                    ))
                })?;
                let origin = frontend_url.trim_end_matches('/').to_string();
                if !allowed_origins.contains(&origin) {
                    allowed_origins.push(origin);
                }
            }
        }

        let token_source = match vars.get("AUTH_TOKEN_SOURCE") {
            Some(value) => value.parse()?,
            None => TokenSource::Cookie,
        };

        let max_body_bytes = if let Some(value_str) = vars.get("MAX_BODY_BYTES") {
            let value: usize = value_str.parse().map_err(|e| {
                ConfigError::InvalidBodyLimit(format!(
                    "MAX_BODY_BYTES must be a valid positive integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            if value == 0 {
                return Err(ConfigError::InvalidBodyLimit(
                    "MAX_BODY_BYTES must be greater than 0".to_string(),
                ));
            }

            value
        } else {
            DEFAULT_MAX_BODY_BYTES
        };

        let session_cookie_name = vars
            .get("SESSION_COOKIE_NAME")
            .cloned()
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE_NAME.to_string());

        let session_key_prefix = vars
            .get("SESSION_KEY_PREFIX")
            .cloned()
            .unwrap_or_else(|| DEFAULT_SESSION_KEY_PREFIX.to_string());

        let shutdown_timeout_seconds =
            if let Some(value_str) = vars.get("SHUTDOWN_TIMEOUT_SECONDS") {
                let value: u64 = value_str.parse().map_err(|e| {
                    ConfigError::InvalidShutdownTimeout(format!(
                        "SHUTDOWN_TIMEOUT_SECONDS must be a valid positive integer, got '{}': {}",
                        value_str, e
                    ))
                })?;

                if value == 0 {
                    return Err(ConfigError::InvalidShutdownTimeout(
                        "SHUTDOWN_TIMEOUT_SECONDS must be greater than 0".to_string(),
                    ));
                }

                value
            } else {
                DEFAULT_SHUTDOWN_TIMEOUT_SECONDS
            };

        Ok(Config {
            database_url,
            redis_url,
            jwt_secret,
            jwt_clock_skew_seconds,
            port,
            bind_host,
            environment,
            allowed_origins,
            token_source,
            max_body_bytes,
            session_cookie_name,
            session_key_prefix,
            shutdown_timeout_seconds,
        })
    }

    /// `host:port` string to bind the listener to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }

    /// Whether internal error detail may be returned to clients.
    pub fn is_development(&self) -> bool {
        self.environment == DEVELOPMENT_ENVIRONMENT
    }
}

fn required(vars: &HashMap<String, String>, key: &str) -> Result<String, ConfigError> {
    vars.get(key)
        .cloned()
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

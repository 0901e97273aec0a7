//! Redis-backed session store.
//!
//! # Key Pattern
//!
//! - `{prefix}{session_id}` - JSON session record, e.g. `{"userId": 42, ...}`
//!
//! The default prefix is `sess:`. Records are read-only from this service.
//!
//! # Connection Pattern
//!
//! `ConnectionManager` is cheap to clone and reconnects on its own; each
//! lookup clones it instead of sharing behind a lock.

use super::{is_plausible_session_id, parse_session_record, SessionStore};
use crate::errors::ApiError;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use std::time::Duration;
use tracing::{error, instrument};

/// Connection attempts after the first one, on startup and on reconnect.
const CONNECTION_RETRIES: usize = 2;

/// Bound on each connection attempt and on each command.
const REDIS_TIMEOUT: Duration = Duration::from_secs(2);

/// Session store reading records from Redis.
#[derive(Clone)]
pub struct RedisSessionStore {
    connection: ConnectionManager,
    key_prefix: String,
}

impl RedisSessionStore {
    /// Connect to Redis and verify the connection with `PING`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::SessionStore` if the URL is invalid, the connection
    /// cannot be established, or `PING` fails.
    pub async fn connect(redis_url: &str, key_prefix: &str) -> Result<Self, ApiError> {
        let client = Client::open(redis_url).map_err(|e| {
            // Do NOT log redis_url as it may contain credentials
            error!(target: "ca.sessions.redis", error = %e, "Failed to open Redis client");
            ApiError::SessionStore(format!("Failed to open Redis client: {e}"))
        })?;

        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(CONNECTION_RETRIES)
            .set_connection_timeout(REDIS_TIMEOUT)
            .set_response_timeout(REDIS_TIMEOUT);

        let mut connection = ConnectionManager::new_with_config(client, config)
            .await
            .map_err(|e| {
                error!(target: "ca.sessions.redis", error = %e, "Failed to connect to Redis");
                ApiError::SessionStore(format!("Failed to connect to Redis: {e}"))
            })?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut connection)
            .await
            .map_err(|e| {
                error!(target: "ca.sessions.redis", error = %e, "Redis PING failed");
                ApiError::SessionStore(format!("Redis PING failed: {e}"))
            })?;
        tracing::debug!(target: "ca.sessions.redis", reply = %pong, "Redis reachable");

        Ok(Self {
            connection,
            key_prefix: key_prefix.to_string(),
        })
    }

    fn key(&self, session_id: &str) -> String {
        session_key(&self.key_prefix, session_id)
    }
}

fn session_key(prefix: &str, session_id: &str) -> String {
    format!("{prefix}{session_id}")
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    #[instrument(skip_all, name = "ca.sessions.lookup")]
    async fn find_user_id(&self, session_id: &str) -> Result<Option<i64>, ApiError> {
        if !is_plausible_session_id(session_id) {
            return Ok(None);
        }

        let mut connection = self.connection.clone();
        let raw: Option<String> = connection.get(self.key(session_id)).await?;

        Ok(raw.as_deref().and_then(parse_session_record))
    }
}

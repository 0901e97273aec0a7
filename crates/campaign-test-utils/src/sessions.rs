//! In-memory session store.

use async_trait::async_trait;
use campaign_api::errors::ApiError;
use campaign_api::sessions::SessionStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Session store backed by a map, with a lookup counter and an outage switch.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, i64>>,
    lookups: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `session_id` to `user_id`.
    pub fn insert(&self, session_id: &str, user_id: i64) {
        self.sessions
            .lock()
            .unwrap()
            .insert(session_id.to_string(), user_id);
    }

    /// Forget `session_id`.
    pub fn remove(&self, session_id: &str) {
        self.sessions.lock().unwrap().remove(session_id);
    }

    /// Make every lookup fail as if Redis were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of lookups served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn find_user_id(&self, session_id: &str) -> Result<Option<i64>, ApiError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ApiError::SessionStore("session store unavailable".to_string()));
        }
        Ok(self.sessions.lock().unwrap().get(session_id).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_lookup_remove() {
        let store = InMemorySessionStore::new();
        store.insert("abc", 42);

        assert_eq!(store.find_user_id("abc").await.unwrap(), Some(42));
        assert_eq!(store.find_user_id("other").await.unwrap(), None);

        store.remove("abc");
        assert_eq!(store.find_user_id("abc").await.unwrap(), None);
        assert_eq!(store.lookups(), 3);
    }

    #[tokio::test]
    async fn test_unavailable_store_errors() {
        let store = InMemorySessionStore::new();
        store.insert("abc", 42);
        store.set_unavailable(true);

        assert!(matches!(
            store.find_user_id("abc").await,
            Err(ApiError::SessionStore(_))
        ));

        store.set_unavailable(false);
        assert_eq!(store.find_user_id("abc").await.unwrap(), Some(42));
    }
}

//! Session token store
//!
//! Holds the bearer token for the signed-in account. One instance is
//! created at startup and shared (`Arc`) by every consumer, so a login or
//! logout anywhere in the application is observed everywhere. The token is
//! rehydrated from the storage medium on construction and written back on
//! every mutation; the in-memory value is authoritative for the lifetime
//! of the process.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::storage::StorageMedium;

/// Fixed storage key for the persisted session record.
const SESSION_KEY: &str = "auth-storage";

/// Persisted shape of the session. Absence of a token is stored
/// explicitly so rehydration reads "signed out" rather than "unknown".
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    access_token: Option<String>,
}

/// Observable container for the current session token.
pub struct SessionStore {
    storage: Arc<dyn StorageMedium>,
    token: watch::Sender<Option<String>>,
}

impl SessionStore {
    /// Build the store, rehydrating any previously persisted token.
    ///
    /// A missing key, corrupt payload, or unreadable record all start the
    /// session signed out; none of them is an error.
    pub fn new(storage: Arc<dyn StorageMedium>) -> Self {
        let initial = storage.get(SESSION_KEY).and_then(|raw| {
            match serde_json::from_str::<SessionRecord>(&raw) {
                Ok(record) => record.access_token,
                Err(e) => {
                    tracing::warn!("Discarding unreadable session record: {}", e);
                    None
                }
            }
        });

        let (token, _) = watch::channel(initial);
        Self { storage, token }
    }

    /// Current token, if signed in. No side effects.
    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    /// Replace the session token and persist it.
    pub fn set_token(&self, token: impl Into<String>) {
        let value = Some(token.into());
        self.persist(&value);
        self.token.send_replace(value);
    }

    /// Sign out: drop the token and persist the signed-out record.
    ///
    /// Writes an explicit "no token" record rather than deleting the key.
    pub fn clear_token(&self) {
        self.persist(&None);
        self.token.send_replace(None);
    }

    /// Subscribe to token changes. The receiver sees every mutation made
    /// through [`set_token`](Self::set_token) and
    /// [`clear_token`](Self::clear_token).
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.token.subscribe()
    }

    fn persist(&self, value: &Option<String>) {
        let record = SessionRecord {
            access_token: value.clone(),
        };
        match serde_json::to_string(&record) {
            Ok(raw) => self.storage.set(SESSION_KEY, &raw),
            Err(e) => tracing::warn!("Failed to serialize session record: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, NoopStorage};

    #[test]
    fn test_set_then_get_returns_token() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        store.set_token("tok-abc");
        assert_eq!(store.token().as_deref(), Some("tok-abc"));
    }

    #[test]
    fn test_clear_then_get_returns_none() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        store.set_token("tok-abc");
        store.clear_token();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_token_survives_reload() {
        let storage: Arc<dyn StorageMedium> = Arc::new(MemoryStorage::new());

        let store = SessionStore::new(storage.clone());
        store.set_token("abc");

        // Fresh store over the same medium simulates a process restart
        let reloaded = SessionStore::new(storage);
        assert_eq!(reloaded.token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_corrupt_record_reads_as_signed_out() {
        let storage: Arc<dyn StorageMedium> = Arc::new(MemoryStorage::new());
        storage.set(SESSION_KEY, "not json at all {{{");

        let store = SessionStore::new(storage);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_noop_medium_keeps_state_for_instance_lifetime_only() {
        let storage: Arc<dyn StorageMedium> = Arc::new(NoopStorage);

        let store = SessionStore::new(storage.clone());
        store.set_token("tok-1");
        assert_eq!(store.token().as_deref(), Some("tok-1"));
        store.clear_token();
        assert_eq!(store.token(), None);
        store.set_token("tok-2");

        // Nothing persisted, so a restart starts signed out
        let reloaded = SessionStore::new(storage);
        assert_eq!(reloaded.token(), None);
    }

    #[test]
    fn test_full_session_lifecycle() {
        let storage: Arc<dyn StorageMedium> = Arc::new(MemoryStorage::new());

        let store = SessionStore::new(storage.clone());
        assert_eq!(store.token(), None);

        store.set_token("tok-1");
        assert_eq!(store.token().as_deref(), Some("tok-1"));

        let store = SessionStore::new(storage.clone());
        assert_eq!(store.token().as_deref(), Some("tok-1"));

        store.clear_token();
        assert_eq!(store.token(), None);

        let store = SessionStore::new(storage);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_clear_persists_explicit_absence() {
        let storage: Arc<dyn StorageMedium> = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        store.set_token("abc");
        store.clear_token();

        // The record stays present, with an explicitly absent token
        let raw = storage.get(SESSION_KEY).unwrap();
        let record: SessionRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(record.access_token, None);
    }

    #[test]
    fn test_subscribers_observe_mutations() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        let mut rx = store.subscribe();

        store.set_token("tok-1");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_deref(), Some("tok-1"));

        store.clear_token();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), None);
    }

    #[tokio::test]
    async fn test_subscriber_wakes_on_change() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        let mut rx = store.subscribe();

        store.set_token("tok");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_deref(), Some("tok"));
    }

    #[test]
    fn test_set_overwrites_previous_token() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        store.set_token("first");
        store.set_token("second");
        assert_eq!(store.token().as_deref(), Some("second"));
    }
}

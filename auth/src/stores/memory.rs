//! In-process session store.

use crate::error::{AuthError, Result};
use crate::providers::SessionStore;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Session store backed by a shared in-memory map.
///
/// Clones share the same map, so a gate rebuilt over a clone sees the
/// session written by the previous one.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self
            .entries
            .lock()
            .map_err(|_| AuthError::InternalError("Mutex lock failed".to_string()))?
            .len())
    }

    /// Whether the store holds no keys.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|n| n == 0)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send {
        let entries = Arc::clone(&self.entries);
        let key = key.to_string();

        async move {
            let guard = entries
                .lock()
                .map_err(|_| AuthError::SessionStore("Mutex lock failed".to_string()))?;
            Ok(guard.get(&key).cloned())
        }
    }

    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<()>> + Send {
        let entries = Arc::clone(&self.entries);
        let key = key.to_string();

        async move {
            entries
                .lock()
                .map_err(|_| AuthError::SessionStore("Mutex lock failed".to_string()))?
                .insert(key, value);
            Ok(())
        }
    }

    fn clear(&self, key: &str) -> impl Future<Output = Result<()>> + Send {
        let entries = Arc::clone(&self.entries);
        let key = key.to_string();

        async move {
            entries
                .lock()
                .map_err(|_| AuthError::SessionStore("Mutex lock failed".to_string()))?
                .remove(&key);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_clear() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get("currentUser").await, Ok(None));

        assert!(store.set("currentUser", "{}".to_string()).await.is_ok());
        assert_eq!(store.get("currentUser").await, Ok(Some("{}".to_string())));
        assert_eq!(store.len(), Ok(1));

        assert!(store.clear("currentUser").await.is_ok());
        assert_eq!(store.get("currentUser").await, Ok(None));
        assert_eq!(store.is_empty(), Ok(true));
    }

    #[tokio::test]
    async fn test_clear_missing_key_succeeds() {
        let store = MemorySessionStore::new();
        assert!(store.clear("missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemorySessionStore::new();
        let clone = store.clone();

        assert!(store.set("k", "v".to_string()).await.is_ok());
        assert_eq!(clone.get("k").await, Ok(Some("v".to_string())));
    }
}

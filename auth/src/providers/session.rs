//! Session store trait.

use crate::error::Result;
use std::future::Future;

/// Key-value store holding the persisted session.
///
/// The gate only ever touches the `"currentUser"` key, but the store itself
/// is a plain string map so it can be backed by anything.
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionStore`](crate::AuthError::SessionStore) if
    /// the backing store cannot be read.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionStore`](crate::AuthError::SessionStore) if
    /// the backing store cannot be written.
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<()>> + Send;

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionStore`](crate::AuthError::SessionStore) if
    /// the backing store cannot be written.
    fn clear(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}

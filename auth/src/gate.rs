//! The authentication gate.
//!
//! [`AuthGate`] is the read side that the triage and dispatch subsystems
//! consume. [`SessionGate`] is the session context that owns the current
//! user: it is built over a [`SessionStore`] at startup (restoring any
//! persisted user), updated by `login`/`signup`, and torn down by `logout`.

use crate::constants::CURRENT_USER_KEY;
use crate::error::{AuthError, Result};
use crate::providers::SessionStore;
use crate::state::{User, UserId};
use medify_core::environment::Clock;
use std::sync::{Arc, RwLock};

/// Read access to the authenticated session.
pub trait AuthGate: Send + Sync {
    /// The logged-in user, if any.
    fn current_user(&self) -> Option<User>;

    /// Whether a user is logged in.
    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// The logged-in user, or [`AuthError::AuthRequired`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AuthRequired`] when nobody is logged in.
    fn require_user(&self) -> Result<User> {
        self.current_user().ok_or(AuthError::AuthRequired)
    }
}

impl<G: AuthGate + ?Sized> AuthGate for Arc<G> {
    fn current_user(&self) -> Option<User> {
        (**self).current_user()
    }
}

/// Session context backed by a key-value [`SessionStore`].
///
/// The current user is cached in memory so the synchronous [`AuthGate`]
/// queries never touch the store.
pub struct SessionGate<S> {
    store: S,
    clock: Arc<dyn Clock>,
    current: RwLock<Option<User>>,
}

impl<S: SessionStore> SessionGate<S> {
    /// Build a gate over `store`, restoring a persisted session if present.
    ///
    /// A stored record that no longer parses is discarded and the gate
    /// starts logged out.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionStore`] if the store cannot be read.
    pub async fn restore(store: S, clock: Arc<dyn Clock>) -> Result<Self> {
        let current = match store.get(CURRENT_USER_KEY).await? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "Restored session");
                    Some(user)
                },
                Err(error) => {
                    tracing::warn!(%error, "Discarding unreadable session record");
                    store.clear(CURRENT_USER_KEY).await?;
                    None
                },
            },
            None => None,
        };

        Ok(Self {
            store,
            clock,
            current: RwLock::new(current),
        })
    }

    /// Log in with an email and password.
    ///
    /// Any non-empty pair is accepted. The user id is derived from the
    /// clock and the display name from the email's local part.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidCredentials`] if either field is empty
    /// - [`AuthError::SessionStore`] if the session cannot be persisted
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        if email.is_empty() || password.is_empty() {
            tracing::warn!("Login rejected: missing credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let user = User {
            id: self.next_user_id(),
            name: User::name_from_email(email),
            email: email.to_string(),
        };
        self.start_session(user).await
    }

    /// Create an account and log in.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidInformation`] if any field is empty
    /// - [`AuthError::SessionStore`] if the session cannot be persisted
    #[tracing::instrument(skip(self, password))]
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<User> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            tracing::warn!("Signup rejected: missing information");
            return Err(AuthError::InvalidInformation);
        }

        let user = User {
            id: self.next_user_id(),
            name: name.to_string(),
            email: email.to_string(),
        };
        self.start_session(user).await
    }

    /// End the session and clear the persisted record.
    ///
    /// Logging out while logged out is a no-op apart from clearing the key.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionStore`] if the record cannot be cleared;
    /// the in-memory session is ended regardless.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        let previous = self
            .current
            .write()
            .map_err(|_| AuthError::InternalError("RwLock poisoned".to_string()))?
            .take();

        if let Some(user) = previous {
            tracing::info!(user_id = %user.id, "Logged out");
        }
        self.store.clear(CURRENT_USER_KEY).await
    }

    /// The underlying session store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    async fn start_session(&self, user: User) -> Result<User> {
        let record = serde_json::to_string(&user)?;
        self.store.set(CURRENT_USER_KEY, record).await?;

        *self
            .current
            .write()
            .map_err(|_| AuthError::InternalError("RwLock poisoned".to_string()))? =
            Some(user.clone());

        tracing::info!(user_id = %user.id, "Session started");
        Ok(user)
    }

    fn next_user_id(&self) -> UserId {
        UserId::new(self.clock.now().timestamp_millis().to_string())
    }
}

impl<S: SessionStore> AuthGate for SessionGate<S> {
    fn current_user(&self) -> Option<User> {
        self.current.read().ok().and_then(|user| user.clone())
    }
}

impl<S> std::fmt::Debug for SessionGate<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGate")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

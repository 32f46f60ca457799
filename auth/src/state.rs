//! Authentication state types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User identifier.
///
/// Derived from the login time in milliseconds, so it is stable for the
/// lifetime of a session but not across logins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Create a user id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The authenticated user, as persisted under the session key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Email address.
    pub email: String,
}

impl User {
    /// Display name used when only an email is known: its local part.
    ///
    /// ```
    /// # use medify_auth::User;
    /// assert_eq!(User::name_from_email("asha@example.com"), "asha");
    /// assert_eq!(User::name_from_email("no-at-sign"), "no-at-sign");
    /// ```
    #[must_use]
    pub fn name_from_email(email: &str) -> String {
        email.split('@').next().unwrap_or(email).to_string()
    }
}

//! Error types for authentication operations.

use thiserror::Error;

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Error taxonomy for the authentication gate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    // ═══════════════════════════════════════════════════════════
    // Authentication Errors
    // ═══════════════════════════════════════════════════════════

    /// Email or password missing.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Name, email or password missing on signup.
    #[error("Invalid information")]
    InvalidInformation,

    /// Operation requires a logged-in user.
    #[error("Authentication required")]
    AuthRequired,

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════

    /// Session store operation failed.
    #[error("Session store error: {0}")]
    SessionStore(String),

    /// Stored session record could not be encoded or decoded.
    #[error("Session serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not be exposed to users).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AuthError {
    /// Returns `true` if this error is due to invalid user input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use medify_auth::AuthError;
    /// assert!(AuthError::InvalidCredentials.is_user_error());
    /// assert!(!AuthError::InternalError("lock".into()).is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::InvalidInformation | Self::AuthRequired
        )
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

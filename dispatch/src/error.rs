//! Error types for dispatch operations.

use crate::types::DeliveryStatus;
use medify_runtime::StoreError;
use thiserror::Error;

/// Result type alias for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Reasons a dispatch operation is refused.
///
/// Every refusal leaves the tracker state exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// One or more required fields are empty.
    #[error("Please fill in all required fields: {}", missing.join(", "))]
    Validation {
        /// Names of the missing fields, in form order
        missing: Vec<&'static str>,
    },

    /// Nobody is logged in.
    #[error("Please login to request this service")]
    AuthRequired,

    /// A transition was attempted from the wrong state.
    ///
    /// This is a caller bug, not a user error.
    #[error("Cannot {attempted} from {}", from.map_or_else(|| "no active request".to_string(), |s| s.to_string()))]
    InvalidTransition {
        /// Status of the active delivery, if any
        from: Option<DeliveryStatus>,
        /// What was attempted
        attempted: &'static str,
    },

    /// The runtime refused the action.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DispatchError {
    /// Whether this error should be shown to the user as-is.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::AuthRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let error = DispatchError::InvalidTransition {
            from: Some(DeliveryStatus::Delivered),
            attempted: "begin transit",
        };
        assert_eq!(error.to_string(), "Cannot begin transit from delivered");
        assert!(!error.is_user_error());

        let error = DispatchError::InvalidTransition {
            from: None,
            attempted: "begin transit",
        };
        assert_eq!(error.to_string(), "Cannot begin transit from no active request");

        let error = DispatchError::Validation {
            missing: vec!["address", "phone number"],
        };
        assert_eq!(
            error.to_string(),
            "Please fill in all required fields: address, phone number"
        );
    }
}

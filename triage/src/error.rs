//! Error types for triage operations.

use medify_runtime::StoreError;
use thiserror::Error;

/// Result type alias for triage operations.
pub type Result<T> = std::result::Result<T, TriageError>;

/// Reasons a triage submission is refused.
///
/// None of these leave a partial result behind: the state is untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TriageError {
    /// One or more required fields are empty.
    #[error("Please fill in all required fields: {}", missing.join(", "))]
    Validation {
        /// Names of the missing fields, in form order
        missing: Vec<&'static str>,
    },

    /// Nobody is logged in.
    #[error("Please login to use the diagnosis tool")]
    AuthRequired,

    /// The submission was applied but no result was recorded.
    #[error("Assessment result was not recorded")]
    NotRecorded,

    /// The runtime refused the action.
    #[error(transparent)]
    Store(#[from] StoreError),
}

//! Triage actions.

use crate::catalog::SymptomId;
use crate::types::ValidatedAssessment;
use medify_auth::UserId;

/// Inputs to the triage reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageAction {
    /// Toggle a catalog symptom in the form. Unknown ids are ignored.
    ToggleSymptom(SymptomId),

    /// Evaluate a validated assessment for a logged-in user.
    SubmitAssessment {
        /// Submitting user
        user_id: UserId,
        /// The checked form
        assessment: ValidatedAssessment,
    },

    /// Clear the form and the result.
    Reset,
}

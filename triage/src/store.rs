//! Auth-gated facade over the triage reducer.

use crate::actions::TriageAction;
use crate::catalog::SymptomId;
use crate::environment::TriageEnvironment;
use crate::error::{Result, TriageError};
use crate::reducer::TriageReducer;
use crate::types::{AssessmentForm, DiagnosisResult, SymptomSelection, TriageState};
use medify_auth::AuthGate;
use medify_runtime::Store;

type Inner = Store<TriageState, TriageAction, TriageEnvironment, TriageReducer>;

/// The triage advisor as seen by the presentation layer.
///
/// Every entry point that produces a result checks the session first and
/// refuses with [`TriageError::AuthRequired`] before touching state.
pub struct TriageStore<G> {
    store: Inner,
    gate: G,
}

impl<G: AuthGate> TriageStore<G> {
    /// Create a triage store gated by `gate`.
    #[must_use]
    pub fn new(gate: G, environment: TriageEnvironment) -> Self {
        Self {
            store: Store::new(TriageState::new(), TriageReducer::new(), environment),
            gate,
        }
    }

    /// Toggle a symptom in the form selection.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Store`] if the store is shutting down.
    pub async fn toggle_symptom(&self, id: SymptomId) -> Result<()> {
        self.store.send(TriageAction::ToggleSymptom(id)).await?;
        Ok(())
    }

    /// Validate and evaluate a filled-in form.
    ///
    /// # Errors
    ///
    /// - [`TriageError::AuthRequired`] if nobody is logged in
    /// - [`TriageError::Validation`] listing every missing field
    /// - [`TriageError::NotRecorded`] if the reducer left no result behind
    /// - [`TriageError::Store`] if the store is shutting down
    #[tracing::instrument(skip(self, form))]
    pub async fn submit(&self, form: AssessmentForm) -> Result<DiagnosisResult> {
        let user = self.gate.require_user().map_err(|_| {
            tracing::warn!("Assessment rejected: not logged in");
            TriageError::AuthRequired
        })?;

        let assessment = form.validate().inspect_err(|error| {
            tracing::warn!(%error, "Assessment rejected");
        })?;

        self.store
            .send(TriageAction::SubmitAssessment {
                user_id: user.id,
                assessment,
            })
            .await?;

        self.store
            .state(|s| s.result.clone())
            .await
            .ok_or(TriageError::NotRecorded)
    }

    /// Evaluate a selection without recording it.
    ///
    /// # Errors
    ///
    /// - [`TriageError::AuthRequired`] if nobody is logged in
    /// - [`TriageError::Validation`] if the selection is empty
    pub fn evaluate(&self, selection: &SymptomSelection) -> Result<DiagnosisResult> {
        if !self.gate.is_authenticated() {
            return Err(TriageError::AuthRequired);
        }
        if selection.is_empty() {
            return Err(TriageError::Validation {
                missing: vec!["symptoms"],
            });
        }
        Ok(self.store.environment().rules.evaluate(selection))
    }

    /// Clear the form and the latest result.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Store`] if the store is shutting down.
    pub async fn reset(&self) -> Result<()> {
        self.store.send(TriageAction::Reset).await?;
        Ok(())
    }

    /// Latest result, if any.
    pub async fn result(&self) -> Option<DiagnosisResult> {
        self.store.state(|s| s.result.clone()).await
    }

    /// Current form selection.
    pub async fn selection(&self) -> SymptomSelection {
        self.store.state(|s| s.selection.clone()).await
    }

    /// Full state snapshot.
    pub async fn snapshot(&self) -> TriageState {
        self.store.state(Clone::clone).await
    }
}

//! Reducer for the triage form.

use crate::actions::TriageAction;
use crate::catalog;
use crate::environment::TriageEnvironment;
use crate::types::TriageState;
use medify_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer};

/// Reducer for the triage form and its latest result.
///
/// Evaluation is synchronous: a submitted assessment is scored against the
/// environment's rule table in the same transition, so no effects are ever
/// produced.
#[derive(Clone, Debug, Default)]
pub struct TriageReducer;

impl TriageReducer {
    /// Creates a new `TriageReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TriageReducer {
    type State = TriageState;
    type Action = TriageAction;
    type Environment = TriageEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TriageAction::ToggleSymptom(id) => {
                if catalog::by_id(id).is_some() {
                    state.selection.toggle(id);
                } else {
                    tracing::debug!(symptom_id = %id, "Ignoring unknown symptom");
                }
            },

            TriageAction::SubmitAssessment {
                user_id,
                assessment,
            } => {
                let result = env.rules.evaluate(assessment.selected());
                tracing::info!(
                    user_id = %user_id,
                    condition = %result.condition,
                    confidence = result.confidence,
                    "Assessment evaluated"
                );

                state.selection = assessment.selected().clone();
                state.result = Some(result);
                state.assessed_by = Some(user_id);
                state.assessed_at = Some(env.clock.now());
            },

            TriageAction::Reset => {
                *state = TriageState::new();
            },
        }

        SmallVec::new()
    }
}

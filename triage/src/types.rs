//! Triage domain types.

use crate::catalog::{self, Marker, SymptomId};
use crate::error::{Result, TriageError};
use medify_auth::UserId;
use medify_core::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A set of selected symptoms. Order is irrelevant; ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomSelection(BTreeSet<SymptomId>);

impl SymptomSelection {
    /// Create an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Add a symptom. Returns `false` if it was already selected.
    pub fn insert(&mut self, id: SymptomId) -> bool {
        self.0.insert(id)
    }

    /// Select the symptom if unselected, unselect it otherwise.
    pub fn toggle(&mut self, id: SymptomId) {
        if !self.0.remove(&id) {
            self.0.insert(id);
        }
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: SymptomId) -> bool {
        self.0.contains(&id)
    }

    /// Whether the marker symptom is selected.
    #[must_use]
    pub fn has_marker(&self, marker: Marker) -> bool {
        self.contains(marker.symptom_id())
    }

    /// Number of selected symptoms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = SymptomId> + '_ {
        self.0.iter().copied()
    }

    /// Select every marker in `markers`.
    #[must_use]
    pub fn with_markers(markers: &[Marker]) -> Self {
        markers.iter().map(|m| m.symptom_id()).collect()
    }
}

impl FromIterator<SymptomId> for SymptomSelection {
    fn from_iter<I: IntoIterator<Item = SymptomId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// How quickly the user should seek care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Self-care
    Low,
    /// See a doctor
    Medium,
    /// Seek care immediately
    High,
}

/// Outcome of a triage evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    /// Suspected condition
    pub condition: String,
    /// Confidence score, 0 to 100
    pub confidence: u8,
    /// Explanation shown to the user
    pub description: String,
    /// Recommendations, in display order
    pub recommendations: Vec<String>,
    /// Urgency tier
    pub urgency: Urgency,
}

/// The triage form as filled in by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssessmentForm {
    /// Age, as typed
    pub age: String,
    /// Gender
    pub gender: String,
    /// Primary symptom, free text
    pub primary_symptom: String,
    /// Optional extra details
    pub additional_info: String,
    /// Selected catalog symptoms
    pub selected: SymptomSelection,
}

impl AssessmentForm {
    /// Check required fields and produce a [`ValidatedAssessment`].
    ///
    /// Every missing field is reported, not only the first. Unknown symptom
    /// ids are dropped before the emptiness check.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Validation`] listing the missing fields.
    pub fn validate(self) -> Result<ValidatedAssessment> {
        let selected: SymptomSelection = self
            .selected
            .iter()
            .filter(|id| catalog::by_id(*id).is_some())
            .collect();

        let mut missing = Vec::new();
        if self.age.trim().is_empty() {
            missing.push("age");
        }
        if self.gender.trim().is_empty() {
            missing.push("gender");
        }
        if self.primary_symptom.trim().is_empty() {
            missing.push("primary symptom");
        }
        if selected.is_empty() {
            missing.push("symptoms");
        }

        if !missing.is_empty() {
            return Err(TriageError::Validation { missing });
        }

        let additional_info = Some(self.additional_info)
            .filter(|info| !info.trim().is_empty());

        Ok(ValidatedAssessment {
            age: self.age,
            gender: self.gender,
            primary_symptom: self.primary_symptom,
            additional_info,
            selected,
        })
    }
}

/// An assessment whose required fields are all present.
///
/// Only [`AssessmentForm::validate`] builds one, so a reducer receiving it
/// never needs to re-check the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAssessment {
    age: String,
    gender: String,
    primary_symptom: String,
    additional_info: Option<String>,
    selected: SymptomSelection,
}

impl ValidatedAssessment {
    /// Age, as typed.
    #[must_use]
    pub fn age(&self) -> &str {
        &self.age
    }

    /// Gender.
    #[must_use]
    pub fn gender(&self) -> &str {
        &self.gender
    }

    /// Primary symptom.
    #[must_use]
    pub fn primary_symptom(&self) -> &str {
        &self.primary_symptom
    }

    /// Extra details, when given.
    #[must_use]
    pub fn additional_info(&self) -> Option<&str> {
        self.additional_info.as_deref()
    }

    /// Selected symptoms (never empty).
    #[must_use]
    pub const fn selected(&self) -> &SymptomSelection {
        &self.selected
    }
}

/// Triage feature state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriageState {
    /// Symptoms currently toggled on in the form
    pub selection: SymptomSelection,
    /// Latest result, replaced by the next submission
    pub result: Option<DiagnosisResult>,
    /// Who submitted the latest assessment
    pub assessed_by: Option<UserId>,
    /// When the latest assessment was evaluated
    pub assessed_at: Option<DateTime<Utc>>,
}

impl TriageState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> AssessmentForm {
        AssessmentForm {
            age: "34".to_string(),
            gender: "female".to_string(),
            primary_symptom: "Sore throat since Monday".to_string(),
            additional_info: String::new(),
            selected: SymptomSelection::with_markers(&[Marker::SoreThroat]),
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = SymptomSelection::new();
        selection.toggle(SymptomId(4));
        assert!(selection.contains(SymptomId(4)));
        selection.toggle(SymptomId(4));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_selection_is_unique_by_id() {
        let selection: SymptomSelection =
            [SymptomId(1), SymptomId(1), SymptomId(3)].into_iter().collect();
        assert_eq!(selection.len(), 2);
        assert!(selection.has_marker(Marker::Fever));
        assert!(selection.has_marker(Marker::Cough));
    }

    #[test]
    fn test_complete_form_validates() {
        let validated = complete_form().validate();
        let Ok(validated) = validated else {
            unreachable!("complete form is valid");
        };
        assert_eq!(validated.age(), "34");
        assert_eq!(validated.additional_info(), None);
        assert_eq!(validated.selected().len(), 1);
    }

    #[test]
    fn test_validation_lists_every_missing_field() {
        let form = AssessmentForm::default();
        assert_eq!(
            form.validate(),
            Err(TriageError::Validation {
                missing: vec!["age", "gender", "primary symptom", "symptoms"],
            })
        );
    }

    #[test]
    fn test_whitespace_only_fields_are_missing() {
        let form = AssessmentForm {
            gender: "  ".to_string(),
            ..complete_form()
        };
        assert_eq!(
            form.validate(),
            Err(TriageError::Validation {
                missing: vec!["gender"],
            })
        );
    }

    #[test]
    fn test_unknown_symptoms_do_not_count() {
        let form = AssessmentForm {
            selected: [SymptomId(99)].into_iter().collect(),
            ..complete_form()
        };
        assert_eq!(
            form.validate(),
            Err(TriageError::Validation {
                missing: vec!["symptoms"],
            })
        );
    }
}

//! The ordered triage rule table.
//!
//! Rules are plain data evaluated top to bottom; the first rule whose
//! required markers are all selected wins. Extra selected symptoms never
//! prevent a match. When no rule matches, the table's fallback outcome is
//! used, so evaluation never fails.

use crate::catalog::Marker;
use crate::types::{DiagnosisResult, SymptomSelection, Urgency};
use std::sync::LazyLock;

/// The result text attached to a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriageOutcome {
    /// Suspected condition
    pub condition: &'static str,
    /// Confidence score, 0 to 100
    pub confidence: u8,
    /// Explanation
    pub description: &'static str,
    /// Recommendations, in display order
    pub recommendations: &'static [&'static str],
    /// Urgency tier
    pub urgency: Urgency,
}

impl TriageOutcome {
    /// Materialize an owned [`DiagnosisResult`].
    #[must_use]
    pub fn to_result(&self) -> DiagnosisResult {
        DiagnosisResult {
            condition: self.condition.to_string(),
            confidence: self.confidence,
            description: self.description.to_string(),
            recommendations: self.recommendations.iter().map(ToString::to_string).collect(),
            urgency: self.urgency,
        }
    }
}

/// One row of the table: a conjunction of markers and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageRule {
    /// Short rule name, used in logs
    pub name: &'static str,
    /// Markers that must all be selected
    pub required: &'static [Marker],
    /// Result when the rule matches
    pub outcome: TriageOutcome,
}

impl TriageRule {
    /// Whether every required marker is in `selection`.
    #[must_use]
    pub fn matches(&self, selection: &SymptomSelection) -> bool {
        self.required.iter().all(|m| selection.has_marker(*m))
    }
}

/// Ordered rules plus the outcome used when none match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<TriageRule>,
    fallback: TriageOutcome,
}

impl RuleTable {
    /// Build a table from rules in priority order.
    #[must_use]
    pub const fn new(rules: Vec<TriageRule>, fallback: TriageOutcome) -> Self {
        Self { rules, fallback }
    }

    /// The standard Medify rule table.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            vec![
                TriageRule {
                    name: "upper-respiratory",
                    required: &[Marker::Fever, Marker::Cough, Marker::SoreThroat],
                    outcome: UPPER_RESPIRATORY_INFECTION,
                },
                TriageRule {
                    name: "influenza",
                    required: &[Marker::Fever, Marker::Headache, Marker::ShortnessOfBreath],
                    outcome: INFLUENZA,
                },
                TriageRule {
                    name: "respiratory-distress",
                    required: &[Marker::ChestPain, Marker::ShortnessOfBreath],
                    outcome: RESPIRATORY_DISTRESS,
                },
            ],
            MILD_VIRAL_SYNDROME,
        )
    }

    /// Rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &[TriageRule] {
        &self.rules
    }

    /// Outcome used when no rule matches.
    #[must_use]
    pub const fn fallback(&self) -> &TriageOutcome {
        &self.fallback
    }

    /// The first matching rule, if any.
    #[must_use]
    pub fn first_match(&self, selection: &SymptomSelection) -> Option<&TriageRule> {
        self.rules.iter().find(|rule| rule.matches(selection))
    }

    /// Evaluate `selection` against the table.
    #[must_use]
    pub fn evaluate(&self, selection: &SymptomSelection) -> DiagnosisResult {
        match self.first_match(selection) {
            Some(rule) => {
                tracing::debug!(rule = rule.name, "Triage rule matched");
                rule.outcome.to_result()
            },
            None => {
                tracing::debug!("No triage rule matched, using fallback");
                self.fallback.to_result()
            },
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

static STANDARD: LazyLock<RuleTable> = LazyLock::new(RuleTable::standard);

/// Evaluate `selection` against the standard rule table.
///
/// ```
/// use medify_triage::{Marker, SymptomSelection, Urgency, evaluate};
///
/// let selection = SymptomSelection::with_markers(&[Marker::ChestPain, Marker::ShortnessOfBreath]);
/// let result = evaluate(&selection);
/// assert_eq!(result.condition, "Respiratory Distress");
/// assert_eq!(result.urgency, Urgency::High);
/// ```
#[must_use]
pub fn evaluate(selection: &SymptomSelection) -> DiagnosisResult {
    STANDARD.evaluate(selection)
}

/// Fever, cough and sore throat.
pub const UPPER_RESPIRATORY_INFECTION: TriageOutcome = TriageOutcome {
    condition: "Upper Respiratory Infection",
    confidence: 85,
    description: "Your symptoms suggest an upper respiratory tract infection, possibly viral \
                  in nature. This is usually not serious but requires rest and proper hydration.",
    recommendations: &[
        "Get plenty of rest and stay hydrated",
        "Take over-the-counter medications for symptom relief",
        "Monitor your temperature",
    ],
    urgency: Urgency::Low,
};

/// Fever, headache and shortness of breath.
pub const INFLUENZA: TriageOutcome = TriageOutcome {
    condition: "Influenza",
    confidence: 78,
    description: "Your symptoms are consistent with influenza (flu). While usually not \
                  severe, it can lead to complications in some cases.",
    recommendations: &[
        "Rest at home and avoid contact with others",
        "Take antipyretics for fever if needed",
        "Consider antiviral medications if diagnosed within 48 hours",
    ],
    urgency: Urgency::Medium,
};

/// Chest pain with shortness of breath.
pub const RESPIRATORY_DISTRESS: TriageOutcome = TriageOutcome {
    condition: "Respiratory Distress",
    confidence: 72,
    description: "Chest pain with difficulty breathing may indicate a more serious condition \
                  that requires medical attention.",
    recommendations: &[
        "Seek immediate medical attention",
        "Do not drive yourself to the hospital",
        "Take note of when symptoms started and their severity",
    ],
    urgency: Urgency::High,
};

/// Fallback.
pub const MILD_VIRAL_SYNDROME: TriageOutcome = TriageOutcome {
    condition: "Mild Viral Syndrome",
    confidence: 65,
    description: "Your symptoms suggest a mild viral condition that should resolve with rest \
                  and proper self-care.",
    recommendations: &[
        "Rest and hydration",
        "Over-the-counter symptom relief as needed",
        "Monitor for worsening symptoms",
    ],
    urgency: Urgency::Low,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SymptomId;
    use proptest::prelude::*;

    fn select(markers: &[Marker]) -> SymptomSelection {
        SymptomSelection::with_markers(markers)
    }

    #[test]
    fn test_rule_order() {
        let table = RuleTable::standard();
        let names: Vec<_> = table.rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            ["upper-respiratory", "influenza", "respiratory-distress"]
        );
        assert_eq!(table.fallback().condition, "Mild Viral Syndrome");
    }

    #[test]
    fn test_upper_respiratory() {
        let result = evaluate(&select(&[Marker::Fever, Marker::Cough, Marker::SoreThroat]));
        assert_eq!(result.condition, "Upper Respiratory Infection");
        assert_eq!(result.confidence, 85);
        assert_eq!(result.urgency, Urgency::Low);
        assert_eq!(result.recommendations.len(), 3);
    }

    #[test]
    fn test_influenza() {
        let result = evaluate(&select(&[
            Marker::Fever,
            Marker::Headache,
            Marker::ShortnessOfBreath,
        ]));
        assert_eq!(result.condition, "Influenza");
        assert_eq!(result.confidence, 78);
        assert_eq!(result.urgency, Urgency::Medium);
    }

    #[test]
    fn test_chest_pain_and_breathing_is_high_urgency() {
        let result = evaluate(&select(&[Marker::ChestPain, Marker::ShortnessOfBreath]));
        assert_eq!(result.condition, "Respiratory Distress");
        assert_eq!(result.confidence, 72);
        assert_eq!(result.urgency, Urgency::High);
    }

    #[test]
    fn test_influenza_beats_respiratory_distress() {
        let result = evaluate(&select(&[
            Marker::Fever,
            Marker::Headache,
            Marker::ShortnessOfBreath,
            Marker::ChestPain,
        ]));
        assert_eq!(result.condition, "Influenza");
    }

    #[test]
    fn test_partial_marker_sets_fall_back() {
        let result = evaluate(&select(&[Marker::Fever, Marker::Cough]));
        assert_eq!(result.condition, "Mild Viral Syndrome");
        assert_eq!(result.confidence, 65);
        assert_eq!(result.urgency, Urgency::Low);
    }

    #[test]
    fn test_empty_selection_falls_back() {
        assert_eq!(evaluate(&SymptomSelection::new()), MILD_VIRAL_SYNDROME.to_result());
    }

    #[test]
    fn test_custom_table_is_first_match() {
        let table = RuleTable::new(
            vec![
                TriageRule {
                    name: "broad",
                    required: &[Marker::Fever],
                    outcome: INFLUENZA,
                },
                TriageRule {
                    name: "narrow",
                    required: &[Marker::Fever, Marker::Cough],
                    outcome: UPPER_RESPIRATORY_INFECTION,
                },
            ],
            MILD_VIRAL_SYNDROME,
        );
        let selection = select(&[Marker::Fever, Marker::Cough]);
        assert_eq!(table.first_match(&selection).map(|r| r.name), Some("broad"));
    }

    fn any_selection() -> impl Strategy<Value = SymptomSelection> {
        proptest::collection::btree_set(1u32..=12, 0..=12)
            .prop_map(|ids| ids.into_iter().map(SymptomId).collect())
    }

    proptest! {
        #[test]
        fn prop_upper_respiratory_wins_over_everything(extra in any_selection()) {
            let mut selection = extra;
            for marker in [Marker::Fever, Marker::Cough, Marker::SoreThroat] {
                selection.insert(marker.symptom_id());
            }
            let result = evaluate(&selection);
            prop_assert_eq!(result.condition.as_str(), "Upper Respiratory Infection");
            prop_assert_eq!(result.confidence, 85);
        }

        #[test]
        fn prop_no_markers_means_fallback(ids in proptest::collection::btree_set(
            prop_oneof![Just(4u32), Just(5), Just(6), Just(9), Just(10), Just(12)],
            0..=6,
        )) {
            let selection: SymptomSelection = ids.into_iter().map(SymptomId).collect();
            let result = evaluate(&selection);
            prop_assert_eq!(result.condition.as_str(), "Mild Viral Syndrome");
            prop_assert_eq!(result.urgency, Urgency::Low);
        }

        #[test]
        fn prop_result_is_the_first_matching_rule(selection in any_selection()) {
            let table = RuleTable::standard();
            let expected = table
                .rules()
                .iter()
                .find(|rule| rule.required.iter().all(|m| selection.has_marker(*m)))
                .map_or(table.fallback().condition, |rule| rule.outcome.condition);
            let result = table.evaluate(&selection);
            prop_assert_eq!(result.condition.as_str(), expected);
        }
    }
}

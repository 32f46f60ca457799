//! # Medify Triage
//!
//! Rule-based symptom triage.
//!
//! A user selects symptoms from a fixed catalog of twelve; the selection is
//! scored against an ordered [`RuleTable`] where the first matching rule
//! wins. Only six catalog symptoms ([`Marker`]s) take part in matching:
//!
//! | # | Requires                            | Condition                   | Confidence | Urgency |
//! |---|-------------------------------------|-----------------------------|------------|---------|
//! | 1 | fever, cough, sore throat           | Upper Respiratory Infection | 85         | low     |
//! | 2 | fever, headache, shortness of breath| Influenza                   | 78         | medium  |
//! | 3 | chest pain, shortness of breath     | Respiratory Distress        | 72         | high    |
//! | - | (anything else)                     | Mild Viral Syndrome         | 65         | low     |
//!
//! [`evaluate`] is the pure engine. [`TriageStore`] wraps the form reducer
//! in a runtime store and refuses to evaluate for anonymous users.

pub mod actions;
pub mod catalog;
pub mod environment;
pub mod error;
pub mod reducer;
pub mod rules;
pub mod store;
pub mod types;

pub use actions::TriageAction;
pub use catalog::{Marker, Symptom, SymptomId};
pub use environment::TriageEnvironment;
pub use error::{Result, TriageError};
pub use reducer::TriageReducer;
pub use rules::{RuleTable, TriageOutcome, TriageRule, evaluate};
pub use store::TriageStore;
pub use types::{
    AssessmentForm, DiagnosisResult, SymptomSelection, TriageState, Urgency, ValidatedAssessment,
};

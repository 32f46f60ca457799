//! The fixed symptom catalog.
//!
//! Twelve symptoms, identified by small integer ids. Six of them are
//! [`Marker`]s: the only symptoms the rule table looks at.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identifier of a symptom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomId(pub u32);

impl fmt::Display for SymptomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Symptom {
    /// Unique id
    pub id: SymptomId,
    /// Display name
    pub name: &'static str,
}

const fn symptom(id: u32, name: &'static str) -> Symptom {
    Symptom {
        id: SymptomId(id),
        name,
    }
}

static CATALOG: [Symptom; 12] = [
    symptom(1, "Fever"),
    symptom(2, "Headache"),
    symptom(3, "Cough"),
    symptom(4, "Fatigue"),
    symptom(5, "Nausea"),
    symptom(6, "Dizziness"),
    symptom(7, "Shortness of breath"),
    symptom(8, "Chest pain"),
    symptom(9, "Joint pain"),
    symptom(10, "Rash"),
    symptom(11, "Sore throat"),
    symptom(12, "Diarrhea"),
];

/// Every symptom, in catalog order.
#[must_use]
pub fn all() -> &'static [Symptom] {
    &CATALOG
}

/// Look up a symptom by id.
#[must_use]
pub fn by_id(id: SymptomId) -> Option<&'static Symptom> {
    CATALOG.iter().find(|s| s.id == id)
}

/// Look up a symptom by name, ignoring ASCII case.
#[must_use]
pub fn by_name(name: &str) -> Option<&'static Symptom> {
    CATALOG.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

/// Symptoms the triage rules are written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// Fever
    Fever,
    /// Cough
    Cough,
    /// Headache
    Headache,
    /// Sore throat
    SoreThroat,
    /// Shortness of breath
    ShortnessOfBreath,
    /// Chest pain
    ChestPain,
}

impl Marker {
    /// All markers.
    pub const ALL: [Self; 6] = [
        Self::Fever,
        Self::Cough,
        Self::Headache,
        Self::SoreThroat,
        Self::ShortnessOfBreath,
        Self::ChestPain,
    ];

    /// Catalog name of the marker symptom.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fever => "Fever",
            Self::Cough => "Cough",
            Self::Headache => "Headache",
            Self::SoreThroat => "Sore throat",
            Self::ShortnessOfBreath => "Shortness of breath",
            Self::ChestPain => "Chest pain",
        }
    }

    /// Catalog id of the marker symptom.
    #[must_use]
    pub const fn symptom_id(self) -> SymptomId {
        match self {
            Self::Fever => SymptomId(1),
            Self::Headache => SymptomId(2),
            Self::Cough => SymptomId(3),
            Self::ShortnessOfBreath => SymptomId(7),
            Self::ChestPain => SymptomId(8),
            Self::SoreThroat => SymptomId(11),
        }
    }
}

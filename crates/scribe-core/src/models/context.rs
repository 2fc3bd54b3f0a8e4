//! Host-supplied context available to section parsers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Context for one parse run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParseContext {
    /// Patient the transcript belongs to, when the host knows it
    #[serde(default)]
    pub patient: Option<PatientContext>,
}

/// The patient's existing clinical record, as far as parsers need it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientContext {
    /// Host patient identifier
    pub id: String,
    /// Committed conditions: ICD-10 code (without dots) → condition id
    #[serde(default)]
    pub conditions: BTreeMap<String, String>,
}

impl ParseContext {
    /// Context for a known patient with no recorded conditions.
    pub fn for_patient(id: impl Into<String>) -> Self {
        Self {
            patient: Some(PatientContext::new(id)),
        }
    }
}

impl PatientContext {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            conditions: BTreeMap::new(),
        }
    }

    /// Record a committed condition for this patient.
    pub fn with_condition(mut self, code: impl Into<String>, condition_id: impl Into<String>) -> Self {
        self.conditions.insert(code.into(), condition_id.into());
        self
    }

    /// Look up an existing condition by dot-less ICD-10 code.
    pub fn condition_for(&self, code: &str) -> Option<&str> {
        self.conditions.get(code).map(String::as_str)
    }
}

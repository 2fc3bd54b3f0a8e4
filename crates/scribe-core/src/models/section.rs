//! Section content handed to a section parser.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which segmentation attaches candidate codes to a section.
pub const ICD_10_CODES: &str = "icd_10_codes";

/// A (code, label) pair offered by the segmentation engine as a possible
/// match for free text in a section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateCode {
    /// Standardized diagnosis code (e.g., "I10", "E11.9")
    pub code: String,
    /// Human-readable label the code was listed under
    pub text: String,
}

impl CandidateCode {
    pub fn new(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            text: text.into(),
        }
    }
}

/// One transcript section, as produced by segmentation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SectionContent {
    /// Substantive lines of the section, in transcript order
    pub arguments: Vec<String>,
    /// Auxiliary context supplied alongside the section
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl SectionContent {
    /// Create section content with no auxiliary context.
    pub fn new<S: Into<String>>(arguments: impl IntoIterator<Item = S>) -> Self {
        Self {
            arguments: arguments.into_iter().map(Into::into).collect(),
            extra: Map::new(),
        }
    }

    /// Attach candidate codes under `extra.icd_10_codes`.
    pub fn with_candidate_codes(
        mut self,
        codes: &[CandidateCode],
    ) -> Result<Self, serde_json::Error> {
        self.extra
            .insert(ICD_10_CODES.into(), serde_json::to_value(codes)?);
        Ok(self)
    }

    /// Candidate codes attached to this section.
    ///
    /// Absent or `null` means no candidates. A value that is present but not
    /// a list of `{code, text}` records is an error.
    pub fn candidate_codes(&self) -> Result<Vec<CandidateCode>, serde_json::Error> {
        match self.extra.get(ICD_10_CODES) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => Vec::<CandidateCode>::deserialize(value),
        }
    }

    /// Check whether the section carries any content lines.
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}

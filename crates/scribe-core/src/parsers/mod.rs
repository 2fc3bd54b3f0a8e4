//! Section parsers and the closed section registry.
//!
//! Every [`SectionKind`] maps to exactly one parser through an exhaustive
//! `match`, so adding a kind without a parser fails to compile.

mod assessment;
mod history;
mod narrative;
mod plan;
mod vitals;

pub use assessment::*;
pub use history::*;
pub use narrative::*;
pub use plan::*;
pub use vitals::*;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{CommandKind, ParseContext, SectionContent};

/// Parser errors. Always local to one section.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed candidate codes: {0}")]
    CandidateCodes(#[from] serde_json::Error),

    #[error("Malformed section content: {0}")]
    Malformed(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Options that change parser output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Emit reason-for-visit and HPI commands even for sections with no lines
    pub emit_empty_narratives: bool,
}

/// Uniform parser signature shared by every section kind.
pub type ParserFn = fn(&SectionContent, &ParseContext, &ParseOptions) -> ParseResult<Vec<CommandKind>>;

/// Clinical section types the pipeline knows how to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    ReasonForVisit,
    HistoryOfPresentIllness,
    Plan,
    PastMedicalHistory,
    Vitals,
    Assessment,
}

impl SectionKind {
    /// Every section kind, in declaration order.
    pub const ALL: [SectionKind; 6] = [
        SectionKind::ReasonForVisit,
        SectionKind::HistoryOfPresentIllness,
        SectionKind::Plan,
        SectionKind::PastMedicalHistory,
        SectionKind::Vitals,
        SectionKind::Assessment,
    ];

    /// Parser registered for this kind.
    pub fn parser(self) -> ParserFn {
        match self {
            SectionKind::ReasonForVisit => parse_reason_for_visit,
            SectionKind::HistoryOfPresentIllness => parse_history_of_present_illness,
            SectionKind::Plan => parse_plan,
            SectionKind::PastMedicalHistory => parse_past_medical_history,
            SectionKind::Vitals => parse_vitals,
            SectionKind::Assessment => parse_assessment,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::ReasonForVisit => "reason_for_visit",
            SectionKind::HistoryOfPresentIllness => "history_of_present_illness",
            SectionKind::Plan => "plan",
            SectionKind::PastMedicalHistory => "past_medical_history",
            SectionKind::Vitals => "vitals",
            SectionKind::Assessment => "assessment",
        }
    }

    /// Parse one section with this kind's parser.
    pub fn parse(
        self,
        content: &SectionContent,
        context: &ParseContext,
        options: &ParseOptions,
    ) -> ParseResult<Vec<CommandKind>> {
        (self.parser())(content, context, options)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full registry as `(kind, parser)` pairs.
pub fn registry() -> [(SectionKind, ParserFn); 6] {
    SectionKind::ALL.map(|kind| (kind, kind.parser()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_covers_every_kind_once() {
        let kinds: HashSet<SectionKind> = registry().iter().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds.len(), SectionKind::ALL.len());
    }

    #[test]
    fn test_kind_names_are_distinct() {
        let names: HashSet<&str> = SectionKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), SectionKind::ALL.len());
    }

    #[test]
    fn test_kind_serializes_as_name() {
        for kind in SectionKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
        }
    }

    #[test]
    fn test_dispatch_through_kind() {
        let content = SectionContent::new(["Prescribe medication"]);
        let commands = SectionKind::Plan
            .parse(&content, &ParseContext::default(), &ParseOptions::default())
            .unwrap();

        assert_eq!(
            commands,
            vec![CommandKind::Plan {
                narrative: "Prescribe medication".into()
            }]
        );
    }
}

//! Provider section-name vocabularies.

use serde::{Deserialize, Serialize};

use crate::parsers::SectionKind;

use super::{HeaderSegmenter, Segmenter};

/// Upstream transcript providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Nabla,
    Scribe,
}

/// Section names every provider uses.
const SHARED_NAMES: &[(&str, SectionKind)] = &[
    ("chief_complaint", SectionKind::ReasonForVisit),
    ("history_of_present_illness", SectionKind::HistoryOfPresentIllness),
    ("plan", SectionKind::Plan),
    ("past_medical_history", SectionKind::PastMedicalHistory),
    ("vitals", SectionKind::Vitals),
    ("assessment", SectionKind::Assessment),
];

/// Extra names only the generic scribe emits.
const SCRIBE_NAMES: &[(&str, SectionKind)] = &[
    ("reason_for_visit", SectionKind::ReasonForVisit),
    ("hpi", SectionKind::HistoryOfPresentIllness),
];

impl Provider {
    /// Section-name vocabulary for this provider.
    pub fn vocabulary(self) -> Vocabulary {
        let extra: &[(&str, SectionKind)] = match self {
            Provider::Nabla => &[],
            Provider::Scribe => SCRIBE_NAMES,
        };
        Vocabulary {
            entries: SHARED_NAMES.iter().chain(extra).copied().collect(),
        }
    }

    /// Segmentation adapter for this provider's transcript format.
    pub fn segmenter(self) -> Box<dyn Segmenter + Send + Sync> {
        match self {
            Provider::Nabla | Provider::Scribe => Box::new(HeaderSegmenter::new()),
        }
    }
}

/// Static mapping from provider section names to section kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    entries: Vec<(&'static str, SectionKind)>,
}

impl Vocabulary {
    /// Section kind for a name. Unknown names resolve to `None`.
    pub fn resolve(&self, name: &str) -> Option<SectionKind> {
        self.entries
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, kind)| *kind)
    }

    /// All `(name, kind)` entries.
    pub fn entries(&self) -> &[(&'static str, SectionKind)] {
        &self.entries
    }

    /// Check that every section kind has at least one name.
    pub fn covers_all_kinds(&self) -> bool {
        SectionKind::ALL
            .iter()
            .all(|kind| self.entries.iter().any(|(_, k)| k == kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_names() {
        for provider in [Provider::Nabla, Provider::Scribe] {
            let vocabulary = provider.vocabulary();
            assert_eq!(
                vocabulary.resolve("chief_complaint"),
                Some(SectionKind::ReasonForVisit)
            );
            assert_eq!(vocabulary.resolve("plan"), Some(SectionKind::Plan));
            assert_eq!(vocabulary.resolve("unsupported_section"), None);
        }
    }

    #[test]
    fn test_scribe_aliases() {
        assert_eq!(
            Provider::Scribe.vocabulary().resolve("hpi"),
            Some(SectionKind::HistoryOfPresentIllness)
        );
        assert_eq!(Provider::Nabla.vocabulary().resolve("hpi"), None);
    }

    #[test]
    fn test_every_kind_reachable() {
        assert!(Provider::Nabla.vocabulary().covers_all_kinds());
        assert!(Provider::Scribe.vocabulary().covers_all_kinds());
    }
}

//! Header-delimited transcript segmentation.
//!
//! Format produced by scribe providers:
//!
//! ```text
//! Chief Complaint
//! - Patient reports headache
//!
//! Plan
//! - Prescribe medication
//!
//! ICD-10 Codes
//! - Headache [R51]
//! ```
//!
//! Sections are separated by blank lines. The first line names the section;
//! the rest are its arguments with bullets and numbering removed. An ICD-10
//! section is not returned itself: its codes are attached to every other
//! section as candidates.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Map;
use tracing::debug;

use crate::models::{CandidateCode, SectionContent, ICD_10_CODES};

use super::{SegmentResult, Segmenter, Sections};

static SECTION_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid section break regex"));

static BULLET_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-•\d.]+\s*").expect("valid bullet regex"));

static ICD_10_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\s*(.+?)\s*\[([A-Z0-9.]+)\]").expect("valid ICD-10 line regex")
});

/// Segmenter for header-delimited text transcripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderSegmenter;

impl HeaderSegmenter {
    pub fn new() -> Self {
        Self
    }
}

impl Segmenter for HeaderSegmenter {
    fn segment(&self, transcript: &str) -> SegmentResult<Sections> {
        let mut sections = Sections::new();
        let mut codes: Option<Vec<CandidateCode>> = None;

        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Ok(sections);
        }

        for block in SECTION_BREAK.split(transcript) {
            let mut lines = block.trim().lines();
            let Some(header) = lines.next() else {
                continue;
            };

            let name = section_name(header);
            if name.is_empty() {
                continue;
            }

            if name == ICD_10_CODES {
                codes = Some(lines.filter_map(parse_icd10_line).collect());
                continue;
            }

            let arguments: Vec<String> = lines
                .map(clean_argument)
                .filter(|line| !line.is_empty())
                .collect();

            debug!(section = %name, lines = arguments.len(), "segmented section");
            sections.insert(
                name,
                SectionContent {
                    arguments,
                    extra: Map::new(),
                },
            );
        }

        if let Some(codes) = codes {
            debug!(codes = codes.len(), "attaching ICD-10 candidates");
            for section in sections.iter_mut() {
                let content = std::mem::take(&mut section.content);
                section.content = content.with_candidate_codes(&codes)?;
            }
        }

        Ok(sections)
    }
}

/// Normalize a header into a section name: `History of Present Illness` →
/// `history_of_present_illness`. Any header mentioning ICD-10 becomes
/// `icd_10_codes`.
pub fn section_name(header: &str) -> String {
    let header = header.trim().trim_end_matches(':').trim().to_lowercase();
    if header.contains("icd-10") {
        return ICD_10_CODES.to_string();
    }
    header.replace(' ', "_")
}

/// Parse one `Description [CODE]` line.
pub fn parse_icd10_line(line: &str) -> Option<CandidateCode> {
    let captures = ICD_10_LINE.captures(line.trim())?;
    Some(CandidateCode::new(&captures[2], &captures[1]))
}

/// Strip surrounding whitespace and any leading bullet or numbering.
pub fn clean_argument(line: &str) -> String {
    BULLET_PREFIX.replace(line.trim(), "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
    Chief Complaint
    - Patient reports headache

    History of Present Illness
    - Headache started 3 days ago
    - Pain is throbbing

    Past Medical History
    - Hypertension
    - Diabetes

    Vitals
    - Blood Pressure: 120/80
    - Heart Rate: 72

    Plan
    - Prescribe medication

    ICD-10 Codes
    - Headache [R51]
    - Hypertension [I10]
    ";

    #[test]
    fn test_segment_sections() {
        let sections = HeaderSegmenter::new().segment(SAMPLE).unwrap();

        assert_eq!(
            sections.names(),
            vec![
                "chief_complaint",
                "history_of_present_illness",
                "past_medical_history",
                "vitals",
                "plan",
            ]
        );
        assert!(!sections.contains(ICD_10_CODES));
    }

    #[test]
    fn test_arguments_are_cleaned() {
        let sections = HeaderSegmenter::new().segment(SAMPLE).unwrap();

        assert_eq!(
            sections.get("history_of_present_illness").unwrap().arguments,
            vec!["Headache started 3 days ago", "Pain is throbbing"]
        );
        assert_eq!(
            sections.get("vitals").unwrap().arguments,
            vec!["Blood Pressure: 120/80", "Heart Rate: 72"]
        );
    }

    #[test]
    fn test_icd10_codes_attached_to_every_section() {
        let sections = HeaderSegmenter::new().segment(SAMPLE).unwrap();
        let expected = vec![
            CandidateCode::new("R51", "Headache"),
            CandidateCode::new("I10", "Hypertension"),
        ];

        for section in &sections {
            assert_eq!(section.content.candidate_codes().unwrap(), expected);
        }
    }

    #[test]
    fn test_no_icd10_section_leaves_extra_empty() {
        let sections = HeaderSegmenter::new()
            .segment("Plan\n- Rest\n\nVitals\n- Pulse: 60")
            .unwrap();

        for section in &sections {
            assert!(section.content.extra.is_empty());
        }
    }

    #[test]
    fn test_blank_transcript() {
        let sections = HeaderSegmenter::new().segment("  \n\n ").unwrap();
        assert!(sections.is_empty());
    }

    #[test]
    fn test_parse_icd10_line() {
        assert_eq!(
            parse_icd10_line("- Headache [R51]"),
            Some(CandidateCode::new("R51", "Headache"))
        );
        assert_eq!(
            parse_icd10_line("Type 2 diabetes mellitus [E11.9]"),
            Some(CandidateCode::new("E11.9", "Type 2 diabetes mellitus"))
        );
        assert_eq!(parse_icd10_line("- Headache"), None);
        assert_eq!(parse_icd10_line("- Headache [r51]"), None);
    }

    #[test]
    fn test_section_name() {
        assert_eq!(section_name("  Chief Complaint "), "chief_complaint");
        assert_eq!(section_name("Plan:"), "plan");
        assert_eq!(section_name("ICD-10 Codes"), ICD_10_CODES);
    }

    #[test]
    fn test_clean_argument() {
        assert_eq!(clean_argument("    - Pain is throbbing"), "Pain is throbbing");
        assert_eq!(clean_argument("2. Follow up in two weeks"), "Follow up in two weeks");
        assert_eq!(clean_argument("• Rest"), "Rest");
        assert_eq!(clean_argument("-"), "");
    }
}

//! Assessment parser.
//!
//! Lines read `Condition, narrative...`. A matched condition the patient
//! already has is assessed; otherwise it is diagnosed.

use crate::matcher::CodeMatcher;
use crate::models::{CommandKind, ParseContext, SectionContent};

use super::{ParseOptions, ParseResult};

/// Assess or diagnose each line whose condition fully matches a candidate.
///
/// Needs both candidate codes and a patient context; without either the
/// section yields nothing.
pub fn parse_assessment(
    content: &SectionContent,
    context: &ParseContext,
    _options: &ParseOptions,
) -> ParseResult<Vec<CommandKind>> {
    let codes = content.candidate_codes()?;
    if codes.is_empty() {
        return Ok(Vec::new());
    }

    let Some(patient) = context.patient.as_ref() else {
        return Ok(Vec::new());
    };

    let matcher = CodeMatcher::new(&codes);
    let mut output = Vec::new();

    for line in &content.arguments {
        let (condition, narrative) = split_assessment_line(line);
        let Some(candidate) = matcher.match_text(condition) else {
            continue;
        };

        let icd10_code = candidate.code.replace('.', "");
        let command = match patient.condition_for(&icd10_code) {
            Some(condition_id) => CommandKind::Assess {
                condition_id: condition_id.to_string(),
                narrative,
            },
            None => CommandKind::Diagnose {
                icd10_code,
                today_assessment: narrative,
            },
        };
        output.push(command);
    }

    Ok(output)
}

/// Split at the first comma. The remaining pieces are concatenated without
/// their commas and trimmed.
fn split_assessment_line(line: &str) -> (&str, String) {
    let mut parts = line.split(',');
    let condition = parts.next().unwrap_or_default();
    let narrative: String = parts.collect();
    (condition, narrative.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandidateCode, PatientContext};

    fn content(lines: &[&str]) -> SectionContent {
        SectionContent::new(lines.iter().copied()).with_candidate_codes(&[
            CandidateCode::new("I10", "Hypertension"),
            CandidateCode::new("E11.9", "Type 2 diabetes"),
        ])
        .unwrap()
    }

    #[test]
    fn test_diagnose_new_condition() {
        let ctx = ParseContext::for_patient("patient-1");
        let commands = parse_assessment(
            &content(&["Type 2 diabetes, newly diagnosed"]),
            &ctx,
            &ParseOptions::default(),
        )
        .unwrap();

        assert_eq!(
            commands,
            vec![CommandKind::Diagnose {
                icd10_code: "E119".into(),
                today_assessment: "newly diagnosed".into(),
            }]
        );
    }

    #[test]
    fn test_assess_existing_condition() {
        let ctx = ParseContext {
            patient: Some(PatientContext::new("patient-1").with_condition("I10", "cond-42")),
        };
        let commands = parse_assessment(
            &content(&["Hypertension, stable, continue lisinopril", "Gout, flaring"]),
            &ctx,
            &ParseOptions::default(),
        )
        .unwrap();

        assert_eq!(
            commands,
            vec![CommandKind::Assess {
                condition_id: "cond-42".into(),
                narrative: "stable continue lisinopril".into(),
            }]
        );
    }

    #[test]
    fn test_requires_patient() {
        let commands = parse_assessment(
            &content(&["Hypertension, stable"]),
            &ParseContext::default(),
            &ParseOptions::default(),
        )
        .unwrap();
        assert!(commands.is_empty());
    }

    #[test]
    fn test_requires_candidates() {
        let ctx = ParseContext::for_patient("patient-1");
        let commands = parse_assessment(
            &SectionContent::new(["Hypertension, stable"]),
            &ctx,
            &ParseOptions::default(),
        )
        .unwrap();
        assert!(commands.is_empty());
    }

    #[test]
    fn test_split_line_without_narrative() {
        assert_eq!(split_assessment_line("Hypertension"), ("Hypertension", String::new()));
    }
}

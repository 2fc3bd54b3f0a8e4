//! Past medical history parser.

use crate::matcher::CodeMatcher;
use crate::models::{CommandKind, ParseContext, SectionContent};

use super::{ParseOptions, ParseResult};

/// One command per line that fully matches a candidate code.
///
/// Without candidate codes nothing is emitted, whatever the lines say.
pub fn parse_past_medical_history(
    content: &SectionContent,
    _context: &ParseContext,
    _options: &ParseOptions,
) -> ParseResult<Vec<CommandKind>> {
    let codes = content.candidate_codes()?;
    if codes.is_empty() {
        return Ok(Vec::new());
    }

    let matcher = CodeMatcher::new(&codes);
    Ok(matcher
        .match_lines(&content.arguments)
        .into_iter()
        .map(|m| CommandKind::PastMedicalHistory { code: m.code })
        .collect())
}

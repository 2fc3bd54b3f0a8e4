//! Join-style parsers: the whole section becomes one prose field.

use crate::models::{CommandKind, ParseContext, SectionContent};

use super::{ParseOptions, ParseResult};

/// Reason for visit: all lines joined into one comment.
pub fn parse_reason_for_visit(
    content: &SectionContent,
    _context: &ParseContext,
    options: &ParseOptions,
) -> ParseResult<Vec<CommandKind>> {
    Ok(join_lines(content, options)
        .map(|comment| CommandKind::ReasonForVisit { comment })
        .into_iter()
        .collect())
}

/// History of present illness: all lines joined into one narrative.
pub fn parse_history_of_present_illness(
    content: &SectionContent,
    _context: &ParseContext,
    options: &ParseOptions,
) -> ParseResult<Vec<CommandKind>> {
    Ok(join_lines(content, options)
        .map(|narrative| CommandKind::HistoryOfPresentIllness { narrative })
        .into_iter()
        .collect())
}

fn join_lines(content: &SectionContent, options: &ParseOptions) -> Option<String> {
    if content.is_empty() && !options.emit_empty_narratives {
        return None;
    }
    Some(content.arguments.join("\n"))
}

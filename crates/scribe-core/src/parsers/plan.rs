//! Plan parser: every line is an independent plan item.

use crate::models::{CommandKind, ParseContext, SectionContent};

use super::{ParseOptions, ParseResult};

/// One plan command per line, in line order.
pub fn parse_plan(
    content: &SectionContent,
    _context: &ParseContext,
    _options: &ParseOptions,
) -> ParseResult<Vec<CommandKind>> {
    Ok(content
        .arguments
        .iter()
        .map(|line| CommandKind::Plan {
            narrative: line.clone(),
        })
        .collect())
}

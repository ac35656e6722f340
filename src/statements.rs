use crate::range::{StatementFinishState, StatementRange};
use serde::Serialize;

/// A statement ready to be handed to an execution layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement<'a> {
    /// Statement text without leading whitespace/comments and trailing delimiter
    pub text: &'a str,
    /// Byte offset of `text` in the buffer
    pub offset: usize,
    /// 1-based line of the first statement character
    pub line: usize,
    /// 1-based column (in chars) of the first statement character
    pub column: usize,
    pub state: StatementFinishState,
}

/// Find the index of the statement covering `offset`
///
/// With `strict` set, whitespace and comments before a statement belong to that
/// statement (plain span containment). Otherwise they belong to the previous
/// statement, which is what a caret placed after a delimiter usually means.
/// An offset at the very end of the last range maps to the last range.
pub fn statement_index_from_position(
    offset: usize,
    ranges: &[StatementRange],
    strict: bool,
) -> Option<usize> {
    let first = ranges.first()?;
    let last = ranges.last()?;
    if offset < first.span.start || offset > last.span.end() {
        return None;
    }

    let index = ranges
        .partition_point(|range| range.span.end() <= offset)
        .min(ranges.len() - 1);

    if !strict && index > 0 && offset < ranges[index].content_start {
        return Some(index - 1);
    }

    Some(index)
}

/// Extract the statements worth executing from split results
///
/// Delimiter directives and ranges without content are skipped.
pub fn executable_statements<'a>(text: &'a str, ranges: &[StatementRange]) -> Vec<Statement<'a>> {
    let mut statements = Vec::new();
    let mut scanned = 0;
    let mut line = 1;
    let mut line_start = 0;

    for range in ranges {
        if range.state == StatementFinishState::DelimiterChange || !range.has_content() {
            continue;
        }

        let offset = range.content_start;
        for (idx, b) in text.as_bytes()[scanned..offset].iter().enumerate() {
            if *b == b'\n' {
                line += 1;
                line_start = scanned + idx + 1;
            }
        }
        scanned = offset;

        statements.push(Statement {
            text: range.content(text),
            offset,
            line,
            column: text[line_start..offset].chars().count() + 1,
            state: range.state,
        });
    }

    statements
}

use serde::{Deserialize, Serialize};

/// Half-open byte interval over the scanned buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: usize,
    pub length: usize,
}

impl TextSpan {
    pub fn new(start: usize, length: usize) -> Self {
        TextSpan { start, length }
    }

    /// Offset one past the last byte of the span
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }
}

/// How the scanner finished a statement range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementFinishState {
    /// Terminated by the active delimiter
    Complete,
    /// Input ended inside a quoted string, identifier or dollar-quoted body
    OpenString,
    /// The statement is a `DELIMITER` directive
    DelimiterChange,
    /// Input ended before a delimiter was found
    NoDelimiter,
}

impl std::fmt::Display for StatementFinishState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StatementFinishState::Complete => "complete",
            StatementFinishState::OpenString => "open_string",
            StatementFinishState::DelimiterChange => "delimiter_change",
            StatementFinishState::NoDelimiter => "no_delimiter",
        };
        write!(f, "{s}")
    }
}

/// One statement found by the splitter
///
/// `span` covers leading whitespace and comments as well as the trailing
/// delimiter, so consecutive ranges tile the input. For a `DelimiterChange`
/// range, `delimiter` holds the new delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatementRange {
    pub span: TextSpan,
    pub content_start: usize,
    pub delimiter: Option<String>,
    pub state: StatementFinishState,
}

impl StatementRange {
    /// Offset where the statement text ends, excluding a terminating delimiter
    pub fn content_end(&self) -> usize {
        match (&self.state, &self.delimiter) {
            (StatementFinishState::Complete, Some(delimiter)) => self.span.end() - delimiter.len(),
            _ => self.span.end(),
        }
    }

    /// Statement text without leading whitespace/comments and trailing delimiter
    ///
    /// `text` must be the buffer the range was produced from.
    pub fn content<'a>(&self, text: &'a str) -> &'a str {
        &text[self.content_start..self.content_end()]
    }

    /// The full span text, including leading whitespace and delimiter
    pub fn full_text<'a>(&self, text: &'a str) -> &'a str {
        &text[self.span.start..self.span.end()]
    }

    pub fn has_content(&self) -> bool {
        self.content_start < self.content_end()
    }

    pub fn is_complete(&self) -> bool {
        self.state == StatementFinishState::Complete
    }
}

use crate::{
    range::{StatementFinishState, StatementRange, TextSpan},
    result::{Result, SplitterError},
    sql_mode::SqlModes,
    str_utils::{self, BlockCommentKind},
    version::{normalize_version, supports_dollar_quotes},
};

/// Current lexical mode of the scanner
///
/// Payloads hold whatever is needed to leave the mode again: the quote byte
/// or the exact dollar tag (`$$`, `$body$`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanMode<'a> {
    Normal,
    Quoted(u8),
    LineComment,
    BlockComment,
    DollarBody(&'a str),
}

/// Delimiter-aware statement splitter for MySQL-style scripts
///
/// The splitter only holds configuration. Every call to [`StatementSplitter::split`]
/// works on fresh scan state, so one instance can be shared between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementSplitter {
    delimiter: String,
    version: u32,
    backslash_escapes: bool,
}

impl StatementSplitter {
    /// Create a splitter with the delimiter used until a `DELIMITER` directive changes it
    pub fn new(initial_delimiter: impl Into<String>, version: u32) -> Result<Self> {
        let delimiter = initial_delimiter.into();
        if delimiter.is_empty() {
            return Err(SplitterError::EmptyDelimiter);
        }

        Ok(StatementSplitter {
            delimiter,
            version: normalize_version(version),
            backslash_escapes: true,
        })
    }

    /// Apply the lexer-relevant parts of the server's SQL modes
    pub fn with_sql_modes(mut self, modes: &SqlModes) -> Self {
        self.backslash_escapes = modes.backslash_escapes();
        self
    }

    pub fn with_backslash_escapes(mut self, enabled: bool) -> Self {
        self.backslash_escapes = enabled;
        self
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn backslash_escapes(&self) -> bool {
        self.backslash_escapes
    }

    /// Split `text` into contiguous statement ranges covering the whole buffer
    pub fn split(&self, text: &str) -> Vec<StatementRange> {
        let ranges = Scanner::new(text, self).run();
        tracing::debug!(
            bytes = text.len(),
            statements = ranges.len(),
            version = self.version,
            "determined statement ranges"
        );
        ranges
    }
}

/// Split `text` into statement ranges, starting with `initial_delimiter`
///
/// Fails only if `initial_delimiter` is empty. Unterminated strings, comments or
/// statements are reported through [`StatementFinishState`].
pub fn determine_statement_ranges(
    text: &str,
    initial_delimiter: &str,
    version: u32,
) -> Result<Vec<StatementRange>> {
    Ok(StatementSplitter::new(initial_delimiter, version)?.split(text))
}

/// Scan state for a single split call
struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    delimiter: String,
    version: u32,
    dollar_quotes: bool,
    backslash_escapes: bool,
    mode: ScanMode<'a>,
    // Start of the current range.
    start: usize,
    // First content byte of the current range, valid when `have_content` is set.
    head: usize,
    tail: usize,
    have_content: bool,
    ranges: Vec<StatementRange>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, splitter: &StatementSplitter) -> Self {
        Scanner {
            text,
            bytes: text.as_bytes(),
            delimiter: splitter.delimiter.clone(),
            version: splitter.version,
            dollar_quotes: supports_dollar_quotes(splitter.version),
            backslash_escapes: splitter.backslash_escapes,
            mode: ScanMode::Normal,
            start: 0,
            head: 0,
            tail: 0,
            have_content: false,
            ranges: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<StatementRange> {
        while self.tail < self.bytes.len() {
            match self.mode {
                ScanMode::Normal => self.scan_normal(),
                ScanMode::Quoted(quote) => self.scan_quoted(quote),
                ScanMode::LineComment => self.scan_line_comment(),
                ScanMode::BlockComment => self.scan_block_comment(),
                ScanMode::DollarBody(tag) => self.scan_dollar_body(tag),
            }
        }

        self.finish()
    }

    fn scan_normal(&mut self) {
        let tail = self.tail;
        if self.bytes[tail..].starts_with(self.delimiter.as_bytes()) {
            let content_start = if self.have_content { self.head } else { tail };
            self.tail += self.delimiter.len();
            let delimiter = self.delimiter.clone();
            self.push(content_start, Some(delimiter), StatementFinishState::Complete);
            return;
        }

        let b = self.bytes[tail];
        match b {
            b'\'' | b'"' | b'`' => {
                self.mark_content();
                self.mode = ScanMode::Quoted(b);
                self.tail += 1;
            }
            b'/' if self.bytes.get(tail + 1) == Some(&b'*') => {
                match str_utils::block_comment_kind(self.bytes, tail) {
                    BlockCommentKind::Plain => {}
                    BlockCommentKind::Hidden | BlockCommentKind::Hint => self.mark_content(),
                    BlockCommentKind::Versioned(required) => {
                        if required <= self.version {
                            self.mark_content();
                        }
                    }
                }
                self.mode = ScanMode::BlockComment;
                self.tail += 2;
            }
            b'$' if self.dollar_quotes => {
                self.mark_content();
                match self.dollar_tag_len(tail) {
                    Some(len) => {
                        let text = self.text;
                        self.mode = ScanMode::DollarBody(&text[tail..tail + len]);
                        self.tail += len;
                    }
                    None => self.tail += 1,
                }
            }
            b'd' | b'D' if !self.have_content => {
                match str_utils::match_delimiter_directive(self.text, tail) {
                    Some((directive_end, new_delimiter)) => {
                        self.change_delimiter(directive_end, new_delimiter)
                    }
                    None => {
                        self.mark_content();
                        self.tail += 1;
                    }
                }
            }
            _ => match str_utils::line_comment_introducer(self.bytes, tail) {
                Some(len) => {
                    self.mode = ScanMode::LineComment;
                    self.tail += len;
                }
                None => {
                    if b > b' ' {
                        self.mark_content();
                    }
                    self.tail += 1;
                }
            },
        }
    }

    fn scan_quoted(&mut self, quote: u8) {
        let end = self.bytes.len();
        let escapes = self.backslash_escapes && quote != b'`';
        let mut run = self.tail;

        while run < end {
            let b = self.bytes[run];
            if b == b'\\' && escapes {
                run += 2;
                continue;
            }

            if b == quote {
                if self.bytes.get(run + 1) == Some(&quote) {
                    // Doubled quote char is a literal quote.
                    run += 2;
                    continue;
                }

                self.tail = run + 1;
                self.mode = ScanMode::Normal;
                return;
            }

            run += 1;
        }

        self.tail = end;
    }

    fn scan_line_comment(&mut self) {
        // The newline itself is left to normal mode as whitespace.
        match self.bytes[self.tail..].iter().position(|&b| b == b'\n') {
            Some(offset) => {
                self.tail += offset;
                self.mode = ScanMode::Normal;
            }
            None => self.tail = self.bytes.len(),
        }
    }

    fn scan_block_comment(&mut self) {
        match str_utils::find_from(self.bytes, self.tail, b"*/") {
            Some(pos) => {
                self.tail = pos + 2;
                self.mode = ScanMode::Normal;
            }
            None => self.tail = self.bytes.len(),
        }
    }

    fn scan_dollar_body(&mut self, tag: &str) {
        match str_utils::find_from(self.bytes, self.tail, tag.as_bytes()) {
            Some(pos) => {
                self.tail = pos + tag.len();
                self.mode = ScanMode::Normal;
            }
            None => self.tail = self.bytes.len(),
        }
    }

    /// Tag length for a dollar quote opening at `pos`
    ///
    /// A `$` glued to a preceding identifier byte belongs to that identifier
    /// (`a$b$c` is a valid MySQL name) and never opens a body.
    fn dollar_tag_len(&self, pos: usize) -> Option<usize> {
        if pos > 0 && str_utils::is_identifier_byte(self.bytes[pos - 1]) {
            return None;
        }
        str_utils::dollar_tag_len(self.bytes, pos)
    }

    fn change_delimiter(&mut self, directive_end: usize, new_delimiter: &str) {
        let content_start = self.tail;
        self.tail = directive_end;
        self.delimiter = new_delimiter.to_string();
        tracing::trace!(
            delimiter = new_delimiter,
            offset = content_start,
            "delimiter changed"
        );
        self.push(
            content_start,
            Some(new_delimiter.to_string()),
            StatementFinishState::DelimiterChange,
        );
    }

    fn mark_content(&mut self) {
        if !self.have_content {
            self.have_content = true;
            self.head = self.tail;
        }
    }

    /// Close the current range at `tail` and start a new one there
    fn push(
        &mut self,
        content_start: usize,
        delimiter: Option<String>,
        state: StatementFinishState,
    ) {
        self.ranges.push(StatementRange {
            span: TextSpan::new(self.start, self.tail - self.start),
            content_start,
            delimiter,
            state,
        });

        self.start = self.tail;
        self.head = self.tail;
        self.have_content = false;
    }

    fn finish(mut self) -> Vec<StatementRange> {
        let end = self.bytes.len();
        self.tail = end;

        match self.mode {
            ScanMode::Quoted(_) | ScanMode::DollarBody(_) => {
                let content_start = self.head;
                self.push(content_start, None, StatementFinishState::OpenString);
            }
            // An open comment at the end counts as trailing whitespace.
            ScanMode::Normal | ScanMode::LineComment | ScanMode::BlockComment => {
                if self.start < end {
                    let content_start = if self.have_content { self.head } else { end };
                    self.push(content_start, None, StatementFinishState::NoDelimiter);
                }
            }
        }

        self.ranges
    }
}

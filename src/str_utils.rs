//! Byte-level helpers for the statement scanner
use regex::Regex;

// Regex compiled once as a lazy static for performance
static DELIMITER_DIRECTIVE_REGEX: once_cell::sync::Lazy<Regex> =
    once_cell::sync::Lazy::new(|| Regex::new(r"(?i)^delimiter[ \t]+(\S+)").unwrap());

/// Check for a `DELIMITER <new>` directive starting at `pos`
///
/// Returns the offset just past the new delimiter text and the delimiter itself.
/// `pos` must be on a char boundary.
pub fn match_delimiter_directive(text: &str, pos: usize) -> Option<(usize, &str)> {
    let caps = DELIMITER_DIRECTIVE_REGEX.captures(&text[pos..])?;
    let delimiter = caps.get(1)?;
    Some((pos + delimiter.end(), delimiter.as_str()))
}

/// Bytes that may appear inside an unquoted MySQL identifier
pub fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

fn is_tag_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_tag_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// Length of a dollar-quote tag (`$$` or `$name$`) starting at `pos`, if one is there
///
/// Non-ASCII bytes are accepted as tag characters, so a returned length always
/// ends on a char boundary (the closing `$` is ASCII).
pub fn dollar_tag_len(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes.get(pos) != Some(&b'$') {
        return None;
    }

    let mut run = pos + 1;
    if bytes.get(run).is_some_and(|&b| is_tag_start(b)) {
        run += 1;
        while bytes.get(run).is_some_and(|&b| is_tag_continue(b)) {
            run += 1;
        }
    }

    if bytes.get(run) == Some(&b'$') {
        Some(run + 1 - pos)
    } else {
        None
    }
}

/// Whitespace that must follow `--` for it to start a comment
pub fn is_dash_comment_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Length of the comment introducer at `pos` for a line comment, if any
pub fn line_comment_introducer(bytes: &[u8], pos: usize) -> Option<usize> {
    match *bytes.get(pos)? {
        b'#' => Some(1),
        b'-' if bytes.get(pos + 1) == Some(&b'-')
            && bytes.get(pos + 2).is_some_and(|&b| is_dash_comment_space(b)) =>
        {
            Some(2)
        }
        _ => None,
    }
}

/// Kind of a `/*` comment found at some position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockCommentKind {
    /// `/* ... */`
    Plain,
    /// `/*! ... */` without a version number, always executed
    Hidden,
    /// `/*!NNNNN ... */`, executed by servers at or above the version
    Versioned(u32),
    /// `/*+ ... */` optimizer hint
    Hint,
}

/// Classify a block comment whose `/*` starts at `pos`
pub fn block_comment_kind(bytes: &[u8], pos: usize) -> BlockCommentKind {
    match bytes.get(pos + 2).copied() {
        Some(b'!') => {
            let digits_start = pos + 3;
            let digits = bytes[digits_start.min(bytes.len())..]
                .iter()
                .take(6)
                .take_while(|b| b.is_ascii_digit())
                .count();
            if digits < 5 {
                return BlockCommentKind::Hidden;
            }

            // 5 or 6 ASCII digits always fit a u32.
            let version = bytes[digits_start..digits_start + digits]
                .iter()
                .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
            BlockCommentKind::Versioned(version)
        }
        Some(b'+') => BlockCommentKind::Hint,
        _ => BlockCommentKind::Plain,
    }
}

/// Find `needle` in `bytes` at or after `from`, returning the absolute offset
pub fn find_from(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(from);
    }
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|idx| from + idx)
}

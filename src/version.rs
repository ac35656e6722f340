//! Server version handling
//!
//! Versions are plain integers in MySQL's `major * 10000 + minor * 100 + patch`
//! form, e.g. `80100` for 8.1.0.
use crate::result::{Result, SplitterError};
use regex::Regex;

/// First server version whose grammar accepts `$tag$ ... $tag$` routine bodies
pub const DOLLAR_QUOTE_MIN_VERSION: u32 = 80100;

// Regex compiled once as a lazy static for performance
static VERSION_REGEX: once_cell::sync::Lazy<Regex> = once_cell::sync::Lazy::new(|| {
    Regex::new(r"^\s*([0-9]+)(?:\.([0-9]+))?(?:\.([0-9]+))?(?:-[\w.-]*)?\s*$").unwrap()
});

/// Expand short version numbers: `8` becomes `80000`, `801` becomes `80100`
pub fn normalize_version(version: u32) -> u32 {
    if version < 100 {
        version * 10000
    } else if version < 10000 {
        version * 100
    } else {
        version
    }
}

/// Parse a dotted version string like `8.0.31` or `8.4.0-commercial`
pub fn parse_version(text: &str) -> Result<u32> {
    let caps = VERSION_REGEX
        .captures(text)
        .ok_or_else(|| SplitterError::new_invalid_version(text))?;

    let part = |index: usize| -> Result<u32> {
        match caps.get(index) {
            Some(m) => m
                .as_str()
                .parse::<u32>()
                .map_err(|_| SplitterError::new_invalid_version(text)),
            None => Ok(0),
        }
    };

    let major = part(1)?;
    let minor = part(2)?;
    let patch = part(3)?;
    if minor >= 100 || patch >= 100 || major > 999 {
        return Err(SplitterError::new_invalid_version(text));
    }

    Ok(major * 10000 + minor * 100 + patch)
}

/// Whether dollar-quoted bodies are part of the grammar for this version
pub fn supports_dollar_quotes(version: u32) -> bool {
    normalize_version(version) >= DOLLAR_QUOTE_MIN_VERSION
}

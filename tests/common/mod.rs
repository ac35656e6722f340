#![allow(dead_code)]

use sqlsplitter::{StatementFinishState, StatementRange};

/// Check that the ranges are contiguous and rebuild `text` exactly
pub fn assert_tiles(text: &str, ranges: &[StatementRange]) {
    let mut offset = 0;
    for range in ranges {
        assert_eq!(range.span.start, offset, "gap or overlap before {range:?}");
        assert!(range.span.length > 0, "empty range {range:?}");
        offset = range.span.end();
    }
    assert_eq!(offset, text.len());

    let rebuilt: String = ranges.iter().map(|r| r.full_text(text)).collect();
    assert_eq!(rebuilt, text);
}

pub fn contents<'a>(text: &'a str, ranges: &[StatementRange]) -> Vec<&'a str> {
    ranges.iter().map(|r| r.content(text)).collect()
}

pub fn states(ranges: &[StatementRange]) -> Vec<StatementFinishState> {
    ranges.iter().map(|r| r.state).collect()
}

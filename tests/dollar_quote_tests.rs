mod common;

use common::{assert_tiles, contents, states};
use sqlsplitter::{DOLLAR_QUOTE_MIN_VERSION, StatementFinishState, determine_statement_ranges};

const JS_FUNCTION: &str =
    "CREATE FUNCTION f() RETURNS INT LANGUAGE JAVASCRIPT AS $$ return 1; $$;";

#[test]
fn test_named_tag_body_is_one_statement() {
    let sql = "CREATE PROCEDURE p() LANGUAGE JAVASCRIPT AS $mle$ let x = 1; return x; $mle$;";
    let ranges = determine_statement_ranges(sql, ";", 80100).unwrap();

    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].state, StatementFinishState::Complete);
    assert_eq!(ranges[0].span.end(), sql.len());
    assert_eq!(ranges[0].delimiter.as_deref(), Some(";"));
}

#[test]
fn test_mismatched_tags_leave_body_open() {
    let sql = "CREATE PROCEDURE p() LANGUAGE JAVASCRIPT AS $mle$ let x = 1; $xyz$;";
    let ranges = determine_statement_ranges(sql, ";", 80100).unwrap();

    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].state, StatementFinishState::OpenString);
    assert!(ranges[0].delimiter.is_none());
    assert_eq!(ranges[0].span.end(), sql.len());
}

#[test]
fn test_version_gates_dollar_quotes() {
    let old = determine_statement_ranges(JS_FUNCTION, ";", 80000).unwrap();
    assert_eq!(old.len(), 2);
    assert_eq!(
        contents(JS_FUNCTION, &old),
        vec![
            "CREATE FUNCTION f() RETURNS INT LANGUAGE JAVASCRIPT AS $$ return 1",
            "$$"
        ]
    );
    assert_tiles(JS_FUNCTION, &old);

    for version in [DOLLAR_QUOTE_MIN_VERSION, 90200] {
        let ranges = determine_statement_ranges(JS_FUNCTION, ";", version).unwrap();
        assert_eq!(ranges.len(), 1, "version {version}");
        assert_eq!(ranges[0].state, StatementFinishState::Complete);
    }
}

#[test]
fn test_short_versions_follow_gating() {
    assert_eq!(determine_statement_ranges(JS_FUNCTION, ";", 8).unwrap().len(), 2);
    assert_eq!(determine_statement_ranges(JS_FUNCTION, ";", 801).unwrap().len(), 1);
}

#[test]
fn test_bare_tag_does_not_close_named_body() {
    let sql = "SELECT $a$ x $$ y; $a$; SELECT 2;";
    let ranges = determine_statement_ranges(sql, ";", 90200).unwrap();

    assert_eq!(contents(sql, &ranges), vec!["SELECT $a$ x $$ y; $a$", "SELECT 2"]);
}

#[test]
fn test_named_tag_does_not_close_bare_body() {
    let sql = "SELECT $$ x $a$ y; $$; SELECT 2;";
    let ranges = determine_statement_ranges(sql, ";", 90200).unwrap();

    assert_eq!(contents(sql, &ranges), vec!["SELECT $$ x $a$ y; $$", "SELECT 2"]);
}

#[test]
fn test_tag_text_must_match_exactly() {
    let sql = "SELECT $Tag$ x; $tag$ y; $Tag$;";
    let ranges = determine_statement_ranges(sql, ";", 90200).unwrap();

    assert_eq!(states(&ranges), vec![StatementFinishState::Complete]);
}

#[test]
fn test_dollar_inside_identifier_is_ordinary() {
    let sql = "SELECT a$b$c FROM t; SELECT 1;";
    let ranges = determine_statement_ranges(sql, ";", 90200).unwrap();
    assert_eq!(contents(sql, &ranges), vec!["SELECT a$b$c FROM t", "SELECT 1"]);
}

#[test]
fn test_malformed_tags_are_ordinary() {
    let sql = "SELECT $ 1; SELECT $1$ ; SELECT 2;";
    let ranges = determine_statement_ranges(sql, ";", 90200).unwrap();

    assert_eq!(ranges.len(), 3);
    assert_eq!(states(&ranges), vec![StatementFinishState::Complete; 3]);
}

#[test]
fn test_quotes_and_directives_inside_body_are_ignored() {
    let sql = "SELECT $$ it's ; $$; SELECT 2;";
    let ranges = determine_statement_ranges(sql, ";", 90200).unwrap();
    assert_eq!(contents(sql, &ranges), vec!["SELECT $$ it's ; $$", "SELECT 2"]);

    let sql = "CREATE FUNCTION f() AS $$\nDELIMITER //\n$$;";
    let ranges = determine_statement_ranges(sql, ";", 90200).unwrap();
    assert_eq!(states(&ranges), vec![StatementFinishState::Complete]);
    assert_eq!(ranges[0].delimiter.as_deref(), Some(";"));
}

#[test]
fn test_non_ascii_tag() {
    let sql = "SELECT $é$ x; $é$; SELECT 2;";
    let ranges = determine_statement_ranges(sql, ";", 90200).unwrap();

    assert_eq!(contents(sql, &ranges), vec!["SELECT $é$ x; $é$", "SELECT 2"]);
    assert_tiles(sql, &ranges);
}

#[test]
fn test_unterminated_body_is_open_string() {
    let sql = "SELECT 1; SELECT $$ abc";
    let ranges = determine_statement_ranges(sql, ";", 90200).unwrap();

    assert_eq!(
        states(&ranges),
        vec![StatementFinishState::Complete, StatementFinishState::OpenString]
    );
    assert_eq!(ranges[1].content_start, sql.rfind("SELECT").unwrap());
    assert_tiles(sql, &ranges);
}

#[test]
fn test_custom_delimiter_wins_over_dollar_quote() {
    let sql = "DELIMITER $$\nSELECT 1$$\nSELECT 2$$";
    let ranges = determine_statement_ranges(sql, ";", 90200).unwrap();

    assert_eq!(
        states(&ranges),
        vec![
            StatementFinishState::DelimiterChange,
            StatementFinishState::Complete,
            StatementFinishState::Complete,
        ]
    );
}

#[test]
fn test_routine_body_with_custom_delimiter() {
    let sql = "DELIMITER //\n\
               CREATE FUNCTION add1(x INT) RETURNS INT LANGUAGE JAVASCRIPT AS $js$\n\
               return x + 1; // done\n\
               $js$//\n\
               SELECT add1(1)//";
    let ranges = determine_statement_ranges(sql, ";", 90200).unwrap();

    assert_eq!(
        states(&ranges),
        vec![
            StatementFinishState::DelimiterChange,
            StatementFinishState::Complete,
            StatementFinishState::Complete,
        ]
    );
    assert!(ranges[1].content(sql).ends_with("$js$"));
    assert_eq!(ranges[2].content(sql), "SELECT add1(1)");
}

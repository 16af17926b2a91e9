// tests/coerce_tests.rs

use chrono::{Datelike, TimeZone, Timelike, Utc};
use mongo_search_query::{
    Literal, ObjectId, ParseError, Pattern, RawValue, coerce,
    coerce::{parse_date, parse_number},
};

fn text(s: &str) -> Literal {
    coerce(RawValue::Text(s), false).unwrap()
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_typed_values_pass_through() {
    let id = ObjectId::parse_str("5de937ba34f907002406af7a").unwrap();
    let test_cases = vec![
        Literal::Number(5.0),
        Literal::Boolean(true),
        Literal::ObjectId(id),
    ];

    for literal in test_cases {
        assert_eq!(coerce(RawValue::Literal(literal.clone()), true).unwrap(), literal);
    }
}

#[test]
fn test_booleans() {
    assert_eq!(text("true"), Literal::Boolean(true));
    assert_eq!(text("yes"), Literal::Boolean(true));
    assert_eq!(text("false"), Literal::Boolean(false));
    assert_eq!(text("no"), Literal::Boolean(false));
    // Exact match only
    assert_eq!(text("YES"), Literal::String("YES".into()));
    assert_eq!(text("nope"), Literal::String("nope".into()));
}

#[test]
fn test_quotes_are_stripped() {
    assert_eq!(text("\"upload item\""), Literal::String("upload item".into()));
    assert_eq!(text("'upload item'"), Literal::String("upload item".into()));
    assert_eq!(text("''"), Literal::String(String::new()));
}

#[test]
fn test_quotes_win_over_booleans_and_wildcards() {
    assert_eq!(text("'no'"), Literal::String("no".into()));
    assert_eq!(text("\"*\""), Literal::String("*".into()));
}

#[test]
fn test_plain_string() {
    assert_eq!(text("error"), Literal::String("error".into()));
}

// ============================================================================
// Regular expressions
// ============================================================================

#[test]
fn test_regex_literal() {
    assert_eq!(
        text("/^v.*/"),
        Literal::Regex(Pattern::new("^v.*", false).unwrap())
    );
    assert_eq!(
        coerce(RawValue::Text("/^v.*/"), true).unwrap(),
        Literal::Regex(Pattern::new("^v.*", true).unwrap())
    );
}

#[test]
fn test_case_insensitive_flag_matches() {
    match coerce(RawValue::Text("/^api/"), true).unwrap() {
        Literal::Regex(pattern) => {
            assert!(pattern.is_match("API-1"));
            assert_eq!(pattern.options(), "i");
        }
        other => panic!("Expected regex, got {:?}", other),
    }
}

#[test]
fn test_escaped_slash_in_regex() {
    match text("/a\\/b/") {
        Literal::Regex(pattern) => {
            assert_eq!(pattern.source(), "a/b");
            assert!(pattern.is_match("xa/bx"));
        }
        other => panic!("Expected regex, got {:?}", other),
    }
}

#[test]
fn test_flag_is_ignored_for_non_regex() {
    assert_eq!(
        coerce(RawValue::Text("error"), true).unwrap(),
        Literal::String("error".into())
    );
}

#[test]
fn test_invalid_regex() {
    match coerce(RawValue::Text("/[a-/"), false) {
        Err(ParseError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "[a-"),
        other => panic!("Expected invalid pattern, got {:?}", other),
    }
}

// ============================================================================
// Wildcards
// ============================================================================

#[test]
fn test_wildcard_is_anchored() {
    match text("api-*") {
        Literal::Regex(pattern) => {
            assert!(pattern.is_match("api-"));
            assert!(pattern.is_match("api-v2"));
            assert!(!pattern.is_match("my-api-v2"));
        }
        other => panic!("Expected regex, got {:?}", other),
    }
}

#[test]
fn test_wildcard_escapes_metacharacters() {
    match text("v1.2*") {
        Literal::Regex(pattern) => {
            assert!(pattern.is_match("v1.2.3"));
            assert!(!pattern.is_match("v1x2.3"));
        }
        other => panic!("Expected regex, got {:?}", other),
    }
}

#[test]
fn test_multiple_wildcards() {
    match text("*-db-*") {
        Literal::Regex(pattern) => {
            assert!(pattern.source().starts_with("^.*"));
            assert!(pattern.is_match("eu-db-1"));
            assert!(!pattern.is_match("eu-web-1"));
        }
        other => panic!("Expected regex, got {:?}", other),
    }
}

// ============================================================================
// Dates
// ============================================================================

#[test]
fn test_quoted_date_time() {
    assert_eq!(
        text("\"2019-12-02T08:30:00Z\""),
        Literal::Date(Utc.with_ymd_and_hms(2019, 12, 2, 8, 30, 0).unwrap())
    );
}

#[test]
fn test_date_without_zone_is_utc() {
    assert_eq!(
        text("'2019-12-02T08:30:00'"),
        Literal::Date(Utc.with_ymd_and_hms(2019, 12, 2, 8, 30, 0).unwrap())
    );
}

#[test]
fn test_date_fraction() {
    let date = parse_date("2024-05-01T10:20:30.123Z").unwrap();
    assert_eq!(date.timestamp_subsec_millis(), 123);
    assert_eq!(date.second(), 30);

    let date = parse_date("2024-05-01T10:20:30.5").unwrap();
    assert_eq!(date.timestamp_subsec_millis(), 500);
}

#[test]
fn test_extended_years() {
    assert_eq!(parse_date("12024-01-01T00:00:00Z").unwrap().year(), 12024);
    assert_eq!(parse_date("-0044-03-15T00:00:00Z").unwrap().year(), -44);
}

#[test]
fn test_not_a_date() {
    let test_cases = vec![
        "2024-05-01",
        "2024-05-01 10:20:30",
        "2024-13-01T00:00:00Z",
        "2024-05-01T24:00:00Z",
        "2023-02-29T00:00:00Z",
        "2024-05-01T10:20:30+02:00",
        "yesterday",
    ];

    for input in test_cases {
        assert_eq!(parse_date(input), None, "Failed for input: {}", input);
    }
}

#[test]
fn test_leap_day() {
    assert!(parse_date("2024-02-29T00:00:00Z").is_some());
}

#[test]
fn test_quoted_non_date_stays_string() {
    assert_eq!(
        text("\"2023-02-30T00:00:00Z\""),
        Literal::String("2023-02-30T00:00:00Z".into())
    );
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_parse_number() {
    let test_cases = vec![
        ("0", Some(0.0)),
        ("5", Some(5.0)),
        ("-2.5", Some(-2.5)),
        (".5", Some(0.5)),
        ("1e3", Some(1000.0)),
        ("1.2.3", None),
        ("5abc", None),
        ("-", None),
        ("nan", None),
        ("inf", None),
        ("1e400", None),
        ("-1e400", None),
        ("", None),
    ];

    for (input, expected) in test_cases {
        assert_eq!(parse_number(input), expected, "Failed for input: {}", input);
    }
}

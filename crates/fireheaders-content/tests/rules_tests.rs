//! Tests for the `_headers` rule parser

use fireheaders_content::{Error, HeaderField, HeaderRule, parse_rules};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn rule(source: &str, headers: &[(&str, &str)]) -> HeaderRule {
    HeaderRule {
        source: source.to_string(),
        headers: headers
            .iter()
            .map(|(key, value)| HeaderField {
                key: key.to_string(),
                value: value.to_string(),
            })
            .collect(),
    }
}

#[test]
fn empty_input_yields_no_rules() {
    assert_eq!(parse_rules("").unwrap(), vec![]);
}

#[test]
fn parses_a_single_target() {
    let text = "/*\n  Content-Security-Policy: script-src https: http:\n";
    assert_eq!(
        parse_rules(text).unwrap(),
        vec![rule(
            "/**",
            &[("Content-Security-Policy", "script-src https: http:")]
        )]
    );
}

#[test]
fn parses_two_targets_in_first_appearance_order() {
    let text = "/*\n  Access-Control-Allow-Origin: *\n\n/secure/page\n  X-Frame-Options: DENY\n";
    assert_eq!(
        parse_rules(text).unwrap(),
        vec![
            rule("/**", &[("Access-Control-Allow-Origin", "*")]),
            rule("/secure/page", &[("X-Frame-Options", "DENY")]),
        ]
    );
}

#[test]
fn drops_targets_without_headers() {
    let text = "/orphan\n\n/kept\n  X-Frame-Options: DENY\n";
    assert_eq!(
        parse_rules(text).unwrap(),
        vec![rule("/kept", &[("X-Frame-Options", "DENY")])]
    );
}

#[test]
fn a_lone_source_line_yields_nothing() {
    assert_eq!(parse_rules("/orphan\n").unwrap(), vec![]);
}

#[test]
fn supports_targets_with_multiple_headers() {
    let text = "/secure/page\n  X-Frame-Options: DENY\n  X-Content-Type-Options: nosniff\n  Referrer-Policy: no-referrer\n";
    assert_eq!(
        parse_rules(text).unwrap(),
        vec![rule(
            "/secure/page",
            &[
                ("X-Frame-Options", "DENY"),
                ("X-Content-Type-Options", "nosniff"),
                ("Referrer-Policy", "no-referrer"),
            ]
        )]
    );
}

#[test]
fn comments_do_not_break_header_association() {
    let text = "# deployed site\n/templates/index.html\n# frame policy below\n  X-Frame-Options: SAMEORIGIN\n";
    assert_eq!(
        parse_rules(text).unwrap(),
        vec![rule("/templates/index.html", &[("X-Frame-Options", "SAMEORIGIN")])]
    );
}

#[test]
fn header_before_any_target_is_an_error_with_the_raw_line() {
    let err = parse_rules("  no: source\n").unwrap_err();
    assert!(matches!(err, Error::UnassociatedLine { .. }));
    assert_eq!(
        err.to_string(),
        "Failed to associate line \"  no: source\" to a target"
    );
}

#[test]
fn header_without_separator_is_a_typed_fault() {
    let err = parse_rules("/page\n  NoSeparator\n").unwrap_err();
    assert!(matches!(err, Error::MalformedHeader { .. }));
}

#[rstest]
#[case("/plain/path", "/plain/path")]
#[case("*", "**")]
#[case("/movies/:title", "/movies/*")]
#[case("/a/*/b", "/a/**/b")]
#[case("/files/*/:name", "/files/**/*")]
fn source_patterns_translate(#[case] input: &str, #[case] expected: &str) {
    let text = format!("{input}\n  X-Test: 1\n");
    let rules = parse_rules(&text).unwrap();
    assert_eq!(rules[0].source, expected);
}

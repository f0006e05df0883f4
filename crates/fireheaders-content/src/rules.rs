//! Parsing of the Netlify-style `_headers` grammar
//!
//! A target line starts at column zero; its headers follow on indented
//! lines. Blank lines and `#` comments are skipped wherever they appear,
//! and a target that ends up with no headers contributes nothing.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Splits a trimmed header line at the first `": "` into key and value
static HEADER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^(?P<key>[^:]*): (?P<value>.*)$").unwrap());

/// A named path parameter such as `:title`
static PARAM_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":\w+").unwrap());

/// A single header attached to a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderField {
    pub key: String,
    pub value: String,
}

/// A source pattern with the headers Firebase should serve for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRule {
    pub source: String,
    pub headers: Vec<HeaderField>,
}

/// A target under construction: the raw source line plus its trimmed
/// header lines, before any dialect translation.
#[derive(Debug)]
struct Target {
    source: String,
    headers: Vec<String>,
}

enum State {
    Idle,
    Collecting(Target),
}

enum LineKind<'a> {
    Blank,
    Comment,
    Source,
    Header(&'a str),
}

fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with('#') {
        return LineKind::Comment;
    }
    if line.starts_with(char::is_whitespace) {
        LineKind::Header(trimmed)
    } else {
        LineKind::Source
    }
}

/// Parse `_headers` text into translated rules, in first-appearance order.
pub fn parse_rules(text: &str) -> Result<Vec<HeaderRule>> {
    let mut targets = Vec::new();
    let mut state = State::Idle;

    for line in text.split('\n') {
        match classify(line) {
            LineKind::Blank | LineKind::Comment => {}
            LineKind::Source => {
                let fresh = State::Collecting(Target {
                    source: line.to_string(),
                    headers: Vec::new(),
                });
                if let State::Collecting(done) = std::mem::replace(&mut state, fresh) {
                    targets.push(done);
                }
            }
            LineKind::Header(trimmed) => match &mut state {
                State::Collecting(target) => target.headers.push(trimmed.to_string()),
                State::Idle => {
                    return Err(Error::UnassociatedLine {
                        line: line.to_string(),
                    });
                }
            },
        }
    }
    if let State::Collecting(done) = state {
        targets.push(done);
    }

    targets
        .into_iter()
        .filter(|target| !target.headers.is_empty())
        .map(convert)
        .collect()
}

/// Translate a raw target into the Firebase hosting dialect
fn convert(target: Target) -> Result<HeaderRule> {
    let headers = target
        .headers
        .iter()
        .map(|line| split_header(line))
        .collect::<Result<Vec<_>>>()?;
    Ok(HeaderRule {
        source: convert_source(&target.source),
        headers,
    })
}

/// `*` widens to the recursive `**`, then a `:param` segment becomes a
/// single `*`. Both substitutions apply at most once, leftmost first.
fn convert_source(source: &str) -> String {
    let widened = source.replacen('*', "**", 1);
    PARAM_PATTERN.replace(&widened, "*").into_owned()
}

fn split_header(line: &str) -> Result<HeaderField> {
    let captures = HEADER_PATTERN
        .captures(line)
        .ok_or_else(|| Error::MalformedHeader {
            line: line.to_string(),
        })?;
    Ok(HeaderField {
        key: captures["key"].to_string(),
        value: captures["value"].to_string(),
    })
}

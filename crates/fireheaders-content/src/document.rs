//! The parsed `firebase.json` and its formatting style
//!
//! The original indent unit and final-newline state are captured at parse
//! time and reused verbatim when the document is re-emitted, so repeated
//! runs reproduce the file's style exactly.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::json::{self, Array, JsonDocument, Value};
use crate::region::{self, Region};
use crate::rules::HeaderRule;

/// Whitespace indenting the first key of the document
static INDENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\\A\\{\\r?\\n?(?P<space>[ \\t]*)\"").unwrap());

const DEFAULT_INDENT: &str = "    ";
const HEADERS_PATH: &str = "hosting.headers";

#[derive(Debug)]
pub struct HostingConfig {
    path: PathBuf,
    document: JsonDocument,
    indent_unit: String,
    trailing_newline: bool,
}

impl HostingConfig {
    /// Parse a `firebase.json` source, capturing its formatting style and
    /// verifying that the managed-region markers are present. Fails before
    /// anything could be written back.
    pub fn parse(source: &str, path: impl Into<PathBuf>) -> Result<Self> {
        let config = Self {
            path: path.into(),
            document: json::parse(source)?,
            indent_unit: detect_indent(source),
            trailing_newline: source.ends_with('\n'),
        };
        config.locate_region()?;
        Ok(config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn indent_unit(&self) -> &str {
        &self.indent_unit
    }

    pub fn ends_with_newline(&self) -> bool {
        self.trailing_newline
    }

    /// Locate the managed region within `hosting.headers`
    pub fn locate_region(&self) -> Result<Region> {
        region::locate(self.headers()?)?.ok_or_else(|| Error::MissingMarkers {
            path: self.path.clone(),
        })
    }

    /// Replace the managed region with `rules`, returning how many were
    /// inserted
    pub fn apply_rules(&mut self, rules: &[HeaderRule]) -> Result<usize> {
        let region = self.locate_region()?;
        region::replace(self.headers_mut()?, region, rules);
        Ok(rules.len())
    }

    /// Re-emit the whole document in the captured formatting style
    pub fn render(&self) -> String {
        json::write(&self.document, &self.indent_unit, self.trailing_newline)
    }

    /// Comment-free view of the document for semantic comparison
    pub fn normalize(&self) -> serde_json::Value {
        self.document.root.to_plain()
    }

    fn headers(&self) -> Result<&Array> {
        self.document
            .root
            .as_object()
            .and_then(|root| root.get("hosting"))
            .and_then(Value::as_object)
            .and_then(|hosting| hosting.get("headers"))
            .and_then(Value::as_array)
            .ok_or_else(|| Error::PathNotFound {
                path: HEADERS_PATH.to_string(),
            })
    }

    fn headers_mut(&mut self) -> Result<&mut Array> {
        self.document
            .root
            .as_object_mut()
            .and_then(|root| root.get_mut("hosting"))
            .and_then(Value::as_object_mut)
            .and_then(|hosting| hosting.get_mut("headers"))
            .and_then(Value::as_array_mut)
            .ok_or_else(|| Error::PathNotFound {
                path: HEADERS_PATH.to_string(),
            })
    }
}

fn detect_indent(source: &str) -> String {
    INDENT_PATTERN
        .captures(source)
        .map(|captures| captures["space"].to_string())
        .unwrap_or_else(|| DEFAULT_INDENT.to_string())
}

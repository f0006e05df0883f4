//! Error types for fireheaders-content

use std::path::PathBuf;

use crate::region::{CLOSING_MARK, OPENING_MARK};

/// Result type for fireheaders-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing rules or editing the hosting config
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to associate line \"{line}\" to a target")]
    UnassociatedLine { line: String },

    #[error("Failed to split header line \"{line}\" into \"<key>: <value>\"")]
    MalformedHeader { line: String },

    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    #[error(
        "Please make sure you include the following comments within \"hosting.headers\" at \"{}\":\n    /*{}*/\n    /*{}*/\nthe new headers will appear between the comments.",
        .path.display(),
        OPENING_MARK,
        CLOSING_MARK
    )]
    MissingMarkers { path: PathBuf },

    #[error("Found more than one /*{marker}*/ comment within \"hosting.headers\"")]
    DuplicateMarker { marker: String },

    #[error(
        "The /*{}*/ comment appears before /*{}*/ within \"hosting.headers\"",
        CLOSING_MARK,
        OPENING_MARK
    )]
    MarkerOrder,
}

impl Error {
    pub(crate) fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            column,
            message: message.into(),
        }
    }
}

//! Header rule parsing and comment-preserving editing of `firebase.json`
//!
//! Converts the Netlify-style `_headers` grammar into Firebase hosting
//! header rules and maintains them inside a comment-marked region of the
//! `hosting.headers` array, leaving the rest of the document untouched.

pub mod document;
pub mod error;
pub mod json;
pub mod region;
pub mod rules;

pub use document::HostingConfig;
pub use error::{Error, Result};
pub use region::{CLOSING_MARK, OPENING_MARK, Region};
pub use rules::{HeaderField, HeaderRule, parse_rules};

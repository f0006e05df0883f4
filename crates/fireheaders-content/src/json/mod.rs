//! Minimal JSON-with-comments parsing and serialization
//!
//! Scoped to what the managed-region editor needs: comments kept at
//! explicit structural anchors, raw scalar lexemes so re-emission cannot
//! perturb number or string spellings, and a writer parameterized on the
//! indent unit captured from the original file.

mod lexer;
mod parser;
mod value;
mod writer;

pub use parser::parse;
pub use value::{
    Anchor, AnchoredComment, Array, Comment, CommentKind, Entry, JsonDocument, Object, Value,
};
pub use writer::write;

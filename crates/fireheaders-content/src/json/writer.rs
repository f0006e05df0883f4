//! Serializer that re-emits a parsed document with a fixed indent unit

use crate::json::value::{
    Anchor, AnchoredComment, Array, Comment, CommentKind, JsonDocument, Object, Value,
};

/// Render the document, indenting every nesting level with `indent_unit`
/// and ending with a newline when `trailing_newline` is set.
pub fn write(document: &JsonDocument, indent_unit: &str, trailing_newline: bool) -> String {
    let mut out = String::new();
    for comment in &document.leading {
        write_comment(&mut out, comment);
        out.push('\n');
    }
    write_value(&mut out, &document.root, 0, indent_unit);
    for comment in &document.trailing {
        out.push('\n');
        write_comment(&mut out, comment);
    }
    if trailing_newline {
        out.push('\n');
    }
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize, unit: &str) {
    match value {
        Value::Literal(raw) | Value::Str(raw) => out.push_str(raw),
        Value::Array(array) => write_array(out, array, depth, unit),
        Value::Object(object) => write_object(out, object, depth, unit),
    }
}

fn write_array(out: &mut String, array: &Array, depth: usize, unit: &str) {
    if array.items.is_empty() && array.comments.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push('[');
    out.push('\n');
    let inner = depth + 1;
    write_comment_lines(out, &array.comments, Anchor::Leading, inner, unit);
    for (index, item) in array.items.iter().enumerate() {
        write_comment_lines(out, &array.comments, Anchor::Before(index), inner, unit);
        push_indent(out, inner, unit);
        write_value(out, item, inner, unit);
        if index + 1 < array.items.len() {
            out.push(',');
        }
        write_inline_comments(out, &array.comments, Anchor::After(index));
        out.push('\n');
        write_comment_lines(out, &array.comments, Anchor::After(index), inner, unit);
    }
    push_indent(out, depth, unit);
    out.push(']');
}

fn write_object(out: &mut String, object: &Object, depth: usize, unit: &str) {
    if object.entries.is_empty() && object.comments.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push('{');
    out.push('\n');
    let inner = depth + 1;
    write_comment_lines(out, &object.comments, Anchor::Leading, inner, unit);
    for (index, entry) in object.entries.iter().enumerate() {
        write_comment_lines(out, &object.comments, Anchor::Before(index), inner, unit);
        push_indent(out, inner, unit);
        out.push_str(&entry.key);
        out.push_str(": ");
        write_value(out, &entry.value, inner, unit);
        if index + 1 < object.entries.len() {
            out.push(',');
        }
        write_inline_comments(out, &object.comments, Anchor::After(index));
        out.push('\n');
        write_comment_lines(out, &object.comments, Anchor::After(index), inner, unit);
    }
    push_indent(out, depth, unit);
    out.push('}');
}

/// Own-line comments at the given anchor, one per line
fn write_comment_lines(
    out: &mut String,
    comments: &[AnchoredComment],
    anchor: Anchor,
    depth: usize,
    unit: &str,
) {
    for anchored in comments
        .iter()
        .filter(|anchored| anchored.anchor == anchor && !anchored.comment.inline)
    {
        push_indent(out, depth, unit);
        write_comment(out, &anchored.comment);
        out.push('\n');
    }
}

/// Comments sharing the line of the child at the given anchor
fn write_inline_comments(out: &mut String, comments: &[AnchoredComment], anchor: Anchor) {
    for anchored in comments
        .iter()
        .filter(|anchored| anchored.anchor == anchor && anchored.comment.inline)
    {
        out.push(' ');
        write_comment(out, &anchored.comment);
    }
}

fn write_comment(out: &mut String, comment: &Comment) {
    match comment.kind {
        CommentKind::Line => {
            out.push_str("//");
            out.push_str(&comment.text);
        }
        CommentKind::Block => {
            out.push_str("/*");
            out.push_str(&comment.text);
            out.push_str("*/");
        }
    }
}

fn push_indent(out: &mut String, depth: usize, unit: &str) {
    for _ in 0..depth {
        out.push_str(unit);
    }
}

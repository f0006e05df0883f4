//! Managed-region location and replacement within `hosting.headers`
//!
//! The region is the span of array elements bracketed by the two marker
//! comments. It is owned entirely by the tool: every run rebuilds its
//! contents from the freshly parsed rules, while comments and elements
//! outside the markers are left exactly where they were.

use crate::error::{Error, Result};
use crate::json::{Anchor, AnchoredComment, Array, Comment, Object, Value};
use crate::rules::HeaderRule;

/// Text of the block comment opening the managed region (`/* _headers */`)
pub const OPENING_MARK: &str = " _headers ";
/// Text of the block comment closing the managed region (`/* end _headers */`)
pub const CLOSING_MARK: &str = " end _headers ";

/// Span of `hosting.headers` elements owned by the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub insert_index: usize,
    pub delete_count: usize,
}

/// Find the managed region in a single forward pass over the anchor
/// points: the leading position first, then before/after each element in
/// ascending order. Returns `None` when either marker is absent.
pub fn locate(array: &Array) -> Result<Option<Region>> {
    let Some(opening) = scan(array, OPENING_MARK)? else {
        return Ok(None);
    };
    let Some(closing) = scan(array, CLOSING_MARK)? else {
        return Ok(None);
    };
    if ordinal(closing) < ordinal(opening) {
        return Err(Error::MarkerOrder);
    }
    let insert_index = gap_of(opening);
    Ok(Some(Region {
        insert_index,
        delete_count: gap_of(closing) - insert_index,
    }))
}

/// Replace the managed region with freshly rendered rules.
///
/// The marker comments are detached first so they cannot be duplicated,
/// comments anchored inside the region are dropped with its elements, and
/// comments anchored after it are shifted to stay with their elements.
pub fn replace(array: &mut Array, region: Region, rules: &[HeaderRule]) {
    let open_pos = array
        .comments
        .iter()
        .position(|anchored| anchored.comment.text == OPENING_MARK);
    let close_pos = array
        .comments
        .iter()
        .position(|anchored| anchored.comment.text == CLOSING_MARK);
    let (Some(open_pos), Some(close_pos)) = (open_pos, close_pos) else {
        return;
    };

    let Region {
        insert_index,
        delete_count,
    } = region;
    let end = insert_index + delete_count;
    let new_len = rules.len();
    let new_total = array.items.len() - delete_count + new_len;

    let mut kept_before = Vec::new();
    let mut kept_after = Vec::new();
    for (pos, anchored) in array.comments.drain(..).enumerate() {
        if pos == open_pos || pos == close_pos {
            continue;
        }
        let gap = gap_of(anchored.anchor);
        if gap < insert_index || (gap == insert_index && pos < open_pos) {
            kept_before.push(anchored);
        } else if gap > end || (gap == end && pos > close_pos) {
            let shifted = gap - delete_count + new_len;
            kept_after.push(AnchoredComment {
                anchor: anchor_at(shifted, anchored.comment.inline, new_total),
                comment: anchored.comment,
            });
        }
        // everything in between sat inside the markers and goes with them
    }

    let _removed: Vec<Value> = array
        .items
        .splice(insert_index..end, rules.iter().map(render_rule))
        .collect();

    let mut comments = kept_before;
    comments.push(AnchoredComment {
        anchor: anchor_at(insert_index, false, new_total),
        comment: Comment::block(OPENING_MARK),
    });
    let closing_anchor = if new_len > 0 {
        Anchor::After(insert_index + new_len - 1)
    } else {
        anchor_at(insert_index, false, new_total)
    };
    comments.push(AnchoredComment {
        anchor: closing_anchor,
        comment: Comment::block(CLOSING_MARK),
    });
    comments.extend(kept_after);
    array.comments = comments;
}

/// First anchor holding a comment with the marker text, scanning forward;
/// a second occurrence anywhere is a fault.
fn scan(array: &Array, marker: &str) -> Result<Option<Anchor>> {
    let mut found = None;
    for point in anchor_points(array.items.len()) {
        for anchored in array.comments.iter().filter(|c| c.anchor == point) {
            if anchored.comment.text != marker {
                continue;
            }
            if found.is_some() {
                return Err(Error::DuplicateMarker {
                    marker: marker.to_string(),
                });
            }
            found = Some(point);
        }
    }
    Ok(found)
}

fn anchor_points(len: usize) -> impl Iterator<Item = Anchor> {
    std::iter::once(Anchor::Leading)
        .chain((0..len).flat_map(|index| [Anchor::Before(index), Anchor::After(index)]))
}

/// Position in the forward scan, used to detect inverted marker pairs
fn ordinal(anchor: Anchor) -> usize {
    match anchor {
        Anchor::Leading => 0,
        Anchor::Before(index) => 2 * index + 1,
        Anchor::After(index) => 2 * index + 2,
    }
}

/// The gap between elements an anchor points into (0..=len)
fn gap_of(anchor: Anchor) -> usize {
    match anchor {
        Anchor::Leading => 0,
        Anchor::Before(index) => index,
        Anchor::After(index) => index + 1,
    }
}

/// Anchor form for a comment sitting at `gap` in an array of `total` items
fn anchor_at(gap: usize, inline: bool, total: usize) -> Anchor {
    if inline && gap > 0 {
        Anchor::After(gap - 1)
    } else if total == 0 {
        Anchor::Leading
    } else if gap < total {
        Anchor::Before(gap)
    } else {
        Anchor::After(total - 1)
    }
}

/// Render a rule as the object form Firebase hosting expects
fn render_rule(rule: &HeaderRule) -> Value {
    let mut headers = Array::default();
    for field in &rule.headers {
        let mut header = Object::default();
        header.push("key", Value::string(&field.key));
        header.push("value", Value::string(&field.value));
        headers.items.push(Value::Object(header));
    }
    let mut object = Object::default();
    object.push("source", Value::string(&rule.source));
    object.push("headers", Value::Array(headers));
    Value::Object(object)
}

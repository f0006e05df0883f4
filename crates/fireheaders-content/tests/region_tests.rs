//! Tests for managed-region location and replacement

use fireheaders_content::json::{self, Array, Value};
use fireheaders_content::region::{self, Region};
use fireheaders_content::{CLOSING_MARK, Error, HeaderField, HeaderRule, OPENING_MARK};
use pretty_assertions::assert_eq;

fn parse_array(source: &str) -> Array {
    match json::parse(source).unwrap().root {
        Value::Array(array) => array,
        other => panic!("expected an array, got {other:?}"),
    }
}

fn demo_rule(source: &str) -> HeaderRule {
    HeaderRule {
        source: source.to_string(),
        headers: vec![HeaderField {
            key: "Cache-Control".to_string(),
            value: "no-store".to_string(),
        }],
    }
}

#[test]
fn locates_markers_before_the_first_element() {
    let array = parse_array(
        "[\n    /* _headers */\n    {\"source\": \"/a\"},\n    /* end _headers */\n    {\"source\": \"/keep\"}\n]",
    );
    assert_eq!(
        region::locate(&array).unwrap(),
        Some(Region {
            insert_index: 0,
            delete_count: 1
        })
    );
}

#[test]
fn locates_markers_after_the_last_element() {
    let array = parse_array("[\n    {\"source\": \"/keep\"},\n    /* _headers */\n    /* end _headers */\n]");
    assert_eq!(
        region::locate(&array).unwrap(),
        Some(Region {
            insert_index: 1,
            delete_count: 0
        })
    );
}

#[test]
fn locates_markers_between_elements() {
    let array = parse_array(
        "[\n    {\"source\": \"/a\"},\n    /* _headers */\n    /* end _headers */\n    {\"source\": \"/b\"}\n]",
    );
    assert_eq!(
        region::locate(&array).unwrap(),
        Some(Region {
            insert_index: 1,
            delete_count: 0
        })
    );
}

#[test]
fn locates_a_region_spanning_several_elements() {
    let array = parse_array(
        "[\n    /* _headers */\n    {\"source\": \"/a\"},\n    {\"source\": \"/b\"},\n    /* end _headers */\n]",
    );
    assert_eq!(
        region::locate(&array).unwrap(),
        Some(Region {
            insert_index: 0,
            delete_count: 2
        })
    );
}

#[test]
fn missing_markers_locate_as_none() {
    let array = parse_array("[\n    {\"source\": \"/a\"}\n]");
    assert_eq!(region::locate(&array).unwrap(), None);
}

#[test]
fn duplicate_closing_markers_are_a_fault() {
    let array = parse_array(
        "[\n    /* _headers */\n    /* end _headers */\n    /* end _headers */\n]",
    );
    assert!(matches!(
        region::locate(&array),
        Err(Error::DuplicateMarker { .. })
    ));
}

#[test]
fn closing_before_opening_is_a_fault() {
    let array = parse_array(
        "[\n    {\"source\": \"/a\"}, /* end _headers */\n    /* _headers */\n    {\"source\": \"/b\"}\n]",
    );
    assert!(matches!(region::locate(&array), Err(Error::MarkerOrder)));
}

#[test]
fn replace_swaps_the_region_and_reattaches_markers() {
    let mut array = parse_array(
        "[\n    /* _headers */\n    {\"source\": \"/old\"},\n    {\"source\": \"/older\"},\n    /* end _headers */\n    {\"source\": \"/keep\"}\n]",
    );
    let region = region::locate(&array).unwrap().unwrap();
    assert_eq!(region.delete_count, 2);

    region::replace(&mut array, region, &[demo_rule("/docs/**")]);

    assert_eq!(array.items.len(), 2);
    assert_eq!(
        region::locate(&array).unwrap(),
        Some(Region {
            insert_index: 0,
            delete_count: 1
        })
    );
    let opening = array
        .comments
        .iter()
        .filter(|anchored| anchored.comment.text == OPENING_MARK)
        .count();
    let closing = array
        .comments
        .iter()
        .filter(|anchored| anchored.comment.text == CLOSING_MARK)
        .count();
    assert_eq!((opening, closing), (1, 1));
}

#[test]
fn replace_with_no_rules_leaves_an_empty_region() {
    let mut array = parse_array(
        "[\n    /* _headers */\n    {\"source\": \"/old\"},\n    /* end _headers */\n    {\"source\": \"/keep\"}\n]",
    );
    let region = region::locate(&array).unwrap().unwrap();

    region::replace(&mut array, region, &[]);

    assert_eq!(array.items.len(), 1);
    assert_eq!(
        region::locate(&array).unwrap(),
        Some(Region {
            insert_index: 0,
            delete_count: 0
        })
    );
}

#[test]
fn comments_outside_the_region_survive() {
    let mut array = parse_array(
        "[\n    /* pinned */\n    {\"source\": \"/keep\"},\n    /* _headers */\n    {\"source\": \"/old\"},\n    /* end _headers */\n    // manual tail\n    {\"source\": \"/tail\"}\n]",
    );
    let region = region::locate(&array).unwrap().unwrap();

    region::replace(&mut array, region, &[demo_rule("/docs/**")]);

    let texts: Vec<&str> = array
        .comments
        .iter()
        .map(|anchored| anchored.comment.text.as_str())
        .collect();
    assert!(texts.contains(&" pinned "));
    assert!(texts.contains(&" manual tail"));
}

#[test]
fn comments_inside_the_region_go_with_it() {
    let mut array = parse_array(
        "[\n    /* _headers */\n    {\"source\": \"/old\"},\n    /* stale note */\n    {\"source\": \"/older\"},\n    /* end _headers */\n]",
    );
    let region = region::locate(&array).unwrap().unwrap();

    region::replace(&mut array, region, &[demo_rule("/docs/**")]);

    assert!(
        array
            .comments
            .iter()
            .all(|anchored| anchored.comment.text != " stale note ")
    );
}

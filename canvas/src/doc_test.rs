#![allow(clippy::float_cmp)]

use serde_json::json;
use time::macros::datetime;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn marker(id: &str, x: f64, y: f64, number: u32) -> Marker {
    Marker::new(MarkerId::from(id), Point::new(x, y), DEFAULT_MARKER_RADIUS, number)
}

fn numbers(list: &MarkerList) -> Vec<u32> {
    list.iter().map(|m| m.number).collect()
}

fn ids(list: &MarkerList) -> Vec<&str> {
    list.iter().map(|m| m.id.as_str()).collect()
}

// =============================================================
// MarkerId
// =============================================================

#[test]
fn generated_ids_are_unique() {
    let a = MarkerId::generate();
    let b = MarkerId::generate();
    assert_ne!(a, b);
}

#[test]
fn marker_id_displays_raw_string() {
    assert_eq!(MarkerId::from("1700000000000").to_string(), "1700000000000");
}

#[test]
fn marker_id_serializes_as_plain_string() {
    assert_eq!(serde_json::to_value(MarkerId::from("abc")).unwrap(), json!("abc"));
}

// =============================================================
// Marker serde
// =============================================================

#[test]
fn marker_missing_radius_defaults() {
    let m: Marker = serde_json::from_value(json!({ "id": "a", "x": 1.0, "y": 2.0, "number": 1 })).unwrap();
    assert_eq!(m.radius, DEFAULT_MARKER_RADIUS);
}

#[test]
fn marker_null_radius_defaults() {
    let m: Marker =
        serde_json::from_value(json!({ "id": "a", "x": 1.0, "y": 2.0, "number": 1, "radius": null })).unwrap();
    assert_eq!(m.radius, DEFAULT_MARKER_RADIUS);
}

#[test]
fn marker_zero_radius_defaults() {
    let m: Marker = serde_json::from_value(json!({ "id": "a", "x": 1.0, "y": 2.0, "number": 1, "radius": 0 })).unwrap();
    assert_eq!(m.radius, DEFAULT_MARKER_RADIUS);
}

#[test]
fn marker_explicit_radius_kept() {
    let m: Marker =
        serde_json::from_value(json!({ "id": "a", "x": 1.0, "y": 2.0, "number": 1, "radius": 37.5 })).unwrap();
    assert_eq!(m.radius, 37.5);
}

#[test]
fn marker_serializes_radius() {
    let json = serde_json::to_value(marker("a", 10.0, 20.0, 3)).unwrap();
    assert_eq!(json, json!({ "id": "a", "x": 10.0, "y": 20.0, "number": 3, "radius": 20.0 }));
}

// =============================================================
// renumber
// =============================================================

#[test]
fn renumber_assigns_positions() {
    let out = renumber(vec![marker("a", 0.0, 0.0, 7), marker("b", 0.0, 0.0, 7), marker("c", 0.0, 0.0, 1)]);
    let nums: Vec<u32> = out.iter().map(|m| m.number).collect();
    assert_eq!(nums, vec![1, 2, 3]);
}

#[test]
fn renumber_preserves_order_and_fields() {
    let out = renumber(vec![marker("z", 5.0, 6.0, 9), marker("y", 7.0, 8.0, 2)]);
    assert_eq!(out[0].id.as_str(), "z");
    assert_eq!(out[0].center(), Point::new(5.0, 6.0));
    assert_eq!(out[1].id.as_str(), "y");
}

#[test]
fn renumber_empty_is_empty() {
    assert!(renumber(Vec::new()).is_empty());
}

#[test]
fn delete_middle_then_renumber_closes_gap() {
    let mut list = MarkerList::from(vec![marker("a", 0.0, 0.0, 1), marker("b", 0.0, 0.0, 2), marker("c", 0.0, 0.0, 3)]);
    list.remove(&MarkerId::from("b"));
    assert_eq!(numbers(&list), vec![1, 3]);
    list.renumber();
    assert_eq!(numbers(&list), vec![1, 2]);
    assert_eq!(ids(&list), vec!["a", "c"]);
}

// =============================================================
// MarkerList
// =============================================================

#[test]
fn list_push_appends_at_end() {
    let mut list = MarkerList::new();
    list.push(marker("a", 0.0, 0.0, 1));
    list.push(marker("b", 0.0, 0.0, 2));
    assert_eq!(ids(&list), vec!["a", "b"]);
    assert_eq!(list.len(), 2);
}

#[test]
fn list_get_and_get_mut() {
    let mut list = MarkerList::from(vec![marker("a", 1.0, 2.0, 1)]);
    assert!(list.contains(&MarkerId::from("a")));
    if let Some(m) = list.get_mut(&MarkerId::from("a")) {
        m.x = 9.0;
    }
    assert_eq!(list.get(&MarkerId::from("a")).unwrap().x, 9.0);
    assert!(list.get(&MarkerId::from("missing")).is_none());
}

#[test]
fn list_remove_missing_is_none() {
    let mut list = MarkerList::from(vec![marker("a", 0.0, 0.0, 1)]);
    assert!(list.remove(&MarkerId::from("nope")).is_none());
    assert_eq!(list.len(), 1);
}

#[test]
fn list_serializes_as_array() {
    let list = MarkerList::from(vec![marker("a", 0.0, 0.0, 1)]);
    let json = serde_json::to_value(&list).unwrap();
    assert!(json.is_array());
    assert_eq!(json[0]["id"], "a");
}

// =============================================================
// Puzzle
// =============================================================

#[test]
fn puzzle_new_is_empty() {
    let p = Puzzle::new("p1", "Overhang", "blob:xyz", datetime!(2024-05-01 10:00 UTC));
    assert!(p.markers.is_empty());
    assert_eq!(p.image_url, "blob:xyz");
}

#[test]
fn puzzle_record_shape() {
    let mut p = Puzzle::new("p1", "Overhang", "https://img/1.jpg", datetime!(2024-05-01 10:00 UTC));
    p.markers.push(marker("a", 1.0, 2.0, 1));
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json["id"], "p1");
    assert_eq!(json["name"], "Overhang");
    assert_eq!(json["imageUrl"], "https://img/1.jpg");
    assert_eq!(json["circles"][0]["id"], "a");
    assert_eq!(json["createdAt"], "2024-05-01T10:00:00Z");
}

#[test]
fn puzzle_parses_browser_timestamp_and_legacy_markers() {
    let raw = json!({
        "id": "1716000000000",
        "name": "Slab",
        "imageUrl": "blob:abc",
        "circles": [
            { "id": "1716000000001", "x": 10.0, "y": 20.0, "number": 1 },
            { "id": "1716000000002", "x": 30.0, "y": 40.0, "number": 2, "radius": 45.0 }
        ],
        "createdAt": "2024-05-18T02:40:00.000Z"
    });
    let p: Puzzle = serde_json::from_value(raw).unwrap();
    assert_eq!(p.markers.len(), 2);
    assert_eq!(p.markers.as_slice()[0].radius, DEFAULT_MARKER_RADIUS);
    assert_eq!(p.markers.as_slice()[1].radius, 45.0);
    assert_eq!(p.created_at, datetime!(2024-05-18 02:40 UTC));
}

#[test]
fn puzzle_without_circles_parses_empty() {
    let raw = json!({ "id": "p", "name": "n", "imageUrl": "u", "createdAt": "2024-05-18T02:40:00Z" });
    let p: Puzzle = serde_json::from_value(raw).unwrap();
    assert!(p.markers.is_empty());
}

#[test]
fn puzzle_renumbered_leaves_source_untouched() {
    let mut p = Puzzle::new("p1", "n", "u", datetime!(2024-05-01 10:00 UTC));
    p.markers.push(marker("a", 0.0, 0.0, 5));
    p.markers.push(marker("b", 0.0, 0.0, 5));
    let saved = p.renumbered();
    assert_eq!(numbers(&saved.markers), vec![1, 2]);
    assert_eq!(numbers(&p.markers), vec![5, 5]);
}

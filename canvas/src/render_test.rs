#![allow(clippy::float_cmp)]

use time::macros::datetime;

use super::*;
use crate::doc::{Marker, MarkerList, Puzzle};
use crate::hit::{hit_test, HitPart};
use crate::viewport::{Size, ViewTransform};

fn marker(id: &str, x: f64, y: f64, number: u32) -> Marker {
    Marker::new(MarkerId::from(id), Point::new(x, y), 20.0, number)
}

fn core_with(mode: Mode, markers: Vec<Marker>) -> EngineCore {
    let mut puzzle = Puzzle::new("p1", "Slab", "blob:slab", datetime!(2024-05-01 10:00 UTC));
    puzzle.markers = MarkerList::from(markers);
    let mut core = EngineCore::new(mode, puzzle);
    core.set_viewport(500.0, 400.0, 1.0);
    core.image_loaded(Size::new(1000.0, 800.0));
    core.transform = ViewTransform { scale: 2.0, offset_x: 10.0, offset_y: 0.0 };
    core
}

// =============================================================
// label_font_px
// =============================================================

#[test]
fn viewer_font_scales_with_zoom() {
    assert_eq!(label_font_px(Mode::Viewer, 0.5), 8.0);
    assert_eq!(label_font_px(Mode::Viewer, 2.0), 32.0);
}

#[test]
fn editor_font_has_floor() {
    assert_eq!(label_font_px(Mode::Editor, 0.1), 12.0);
    assert_eq!(label_font_px(Mode::Editor, 2.0), 28.0);
}

// =============================================================
// scene
// =============================================================

#[test]
fn scene_is_empty_without_markers() {
    assert!(scene(&core_with(Mode::Viewer, vec![])).is_empty());
}

#[test]
fn scene_keeps_list_order_and_labels() {
    let core = core_with(Mode::Viewer, vec![marker("a", 0.0, 0.0, 1), marker("b", 50.0, 50.0, 2)]);
    let sprites = scene(&core);
    let labels: Vec<&str> = sprites.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["1", "2"]);
    assert_eq!(sprites[0].id, MarkerId::from("a"));
}

#[test]
fn scene_projects_with_transform() {
    let core = core_with(Mode::Viewer, vec![marker("a", 100.0, 50.0, 1)]);
    let sprite = &scene(&core)[0];
    assert_eq!(sprite.circle.center, Point::new(210.0, 100.0));
    assert_eq!(sprite.circle.radius, 40.0);
    assert_eq!(sprite.font_px, 32.0);
}

#[test]
fn unselected_markers_have_no_ring_or_handle() {
    let core = core_with(Mode::Editor, vec![marker("a", 0.0, 0.0, 1)]);
    let sprite = &scene(&core)[0];
    assert!(sprite.ring.is_none());
    assert!(sprite.handle.is_none());
    assert_eq!(sprite.paint, EDITOR_MARKER);
}

#[test]
fn viewer_selected_marker_gets_ring_but_no_handle() {
    let mut core = core_with(Mode::Viewer, vec![marker("a", 0.0, 0.0, 1)]);
    core.ui.selected_id = Some(MarkerId::from("a"));
    let sprite = &scene(&core)[0];
    assert_eq!(sprite.paint, VIEWER_SELECTED);
    assert_eq!(sprite.ring, Some(Ring { radius: 45.0, line_width: 3.0 }));
    assert!(sprite.handle.is_none());
}

#[test]
fn editor_selected_marker_gets_ring_and_handle() {
    let mut core = core_with(Mode::Editor, vec![marker("a", 0.0, 0.0, 1)]);
    core.ui.selected_id = Some(MarkerId::from("a"));
    let sprite = &scene(&core)[0];
    assert_eq!(sprite.paint, EDITOR_SELECTED);
    assert_eq!(sprite.ring, Some(Ring { radius: 48.0, line_width: 2.0 }));
    assert_eq!(sprite.handle, Some(Point::new(10.0 + 40.0 + 8.0, 0.0)));
}

#[test]
fn drawn_handle_is_where_hit_test_finds_it() {
    let mut core = core_with(Mode::Editor, vec![marker("a", 30.0, 70.0, 1)]);
    let id = MarkerId::from("a");
    core.ui.selected_id = Some(id.clone());
    let handle = scene(&core)[0].handle.unwrap();
    let hit = hit_test(handle, core.markers(), &core.transform(), Some(&id)).unwrap();
    assert_eq!(hit.part, HitPart::ResizeHandle);
}

#[test]
fn only_selected_marker_is_highlighted() {
    let mut core = core_with(Mode::Viewer, vec![marker("a", 0.0, 0.0, 1), marker("b", 200.0, 0.0, 2)]);
    core.ui.selected_id = Some(MarkerId::from("b"));
    let sprites = scene(&core);
    assert_eq!(sprites[0].paint, VIEWER_MARKER);
    assert_eq!(sprites[1].paint, VIEWER_SELECTED);
}

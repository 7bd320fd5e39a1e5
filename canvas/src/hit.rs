//! Hit-testing markers against a screen point.
//!
//! All tests run in screen space so the resize handle keeps a fixed pixel
//! size at any zoom. The geometry here is the same geometry the renderer
//! draws (see [`crate::render::scene`]); a mismatch would make clicks miss
//! visible markers.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{HANDLE_OFFSET_PX, HANDLE_RADIUS_PX};
use crate::doc::{Marker, MarkerId, MarkerList};
use crate::viewport::{Point, ViewTransform};

/// Which part of a marker was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub marker_id: MarkerId,
    pub part: HitPart,
}

/// A marker's circle after projection to the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenCircle {
    pub center: Point,
    pub radius: f64,
}

impl ScreenCircle {
    /// Boundary inclusive.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.distance(self.center) <= self.radius
    }
}

#[must_use]
pub fn screen_circle(marker: &Marker, transform: &ViewTransform) -> ScreenCircle {
    ScreenCircle {
        center: transform.to_screen(marker.center()),
        radius: marker.radius * transform.scale,
    }
}

/// Center of the resize handle: to the right of the rim along screen +x,
/// whatever the zoom.
#[must_use]
pub fn resize_handle_center(marker: &Marker, transform: &ViewTransform) -> Point {
    let circle = screen_circle(marker, transform);
    Point::new(circle.center.x + circle.radius + HANDLE_OFFSET_PX, circle.center.y)
}

#[must_use]
pub fn hits_resize_handle(screen_pt: Point, marker: &Marker, transform: &ViewTransform) -> bool {
    screen_pt.distance(resize_handle_center(marker, transform)) <= HANDLE_RADIUS_PX
}

/// The first marker in list order whose circle contains `screen_pt`.
///
/// List order, not draw order: where markers overlap, the earlier one wins
/// even though the later one is painted on top.
#[must_use]
pub fn marker_at<'a>(screen_pt: Point, markers: &'a MarkerList, transform: &ViewTransform) -> Option<&'a Marker> {
    markers
        .iter()
        .find(|marker| screen_circle(marker, transform).contains(screen_pt))
}

/// Full hit test. When `handle_of` names an existing marker, its resize
/// handle is checked first and beats any body underneath it.
#[must_use]
pub fn hit_test(
    screen_pt: Point,
    markers: &MarkerList,
    transform: &ViewTransform,
    handle_of: Option<&MarkerId>,
) -> Option<Hit> {
    if let Some(marker) = handle_of.and_then(|id| markers.get(id)) {
        if hits_resize_handle(screen_pt, marker, transform) {
            return Some(Hit { marker_id: marker.id.clone(), part: HitPart::ResizeHandle });
        }
    }
    marker_at(screen_pt, markers, transform).map(|marker| Hit { marker_id: marker.id.clone(), part: HitPart::Body })
}

//! Document model: markers ("holds"), the ordered marker list, and puzzles.
//!
//! This module defines what an annotated photo contains and how it looks on
//! the wire. The serde shape is the persisted record:
//!
//! ```json
//! { "id": "…", "name": "…", "imageUrl": "…",
//!   "circles": [{ "id": "…", "x": 1.0, "y": 2.0, "number": 1, "radius": 20.0 }],
//!   "createdAt": "2024-05-01T10:00:00.000Z" }
//! ```
//!
//! `radius` may be absent in records written before markers could be
//! resized; such markers load with [`DEFAULT_MARKER_RADIUS`].
//!
//! Marker order is significant. A marker's `number` is derived from its
//! position by [`renumber`] when the puzzle is saved; between saves it is
//! only a display hint.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::consts::DEFAULT_MARKER_RADIUS;
use crate::viewport::Point;

/// Identifier of a puzzle. Opaque; older records use millisecond timestamps.
pub type PuzzleId = String;

/// Opaque marker identifier, unique within a puzzle and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(String);

impl MarkerId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// A fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MarkerId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// A numbered circular marker in image space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    /// Center x in image pixels.
    pub x: f64,
    /// Center y in image pixels.
    pub y: f64,
    /// 1-based display number; authoritative only right after a save.
    pub number: u32,
    /// Radius in image pixels.
    #[serde(default = "default_radius", deserialize_with = "deserialize_radius")]
    pub radius: f64,
}

impl Marker {
    #[must_use]
    pub fn new(id: MarkerId, center: Point, radius: f64, number: u32) -> Self {
        Self { id, x: center.x, y: center.y, number, radius }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

fn default_radius() -> f64 {
    DEFAULT_MARKER_RADIUS
}

/// Accept `null`, zero, negative or non-finite radii and replace them with
/// the default instead of rejecting the whole record.
fn deserialize_radius<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.filter(|r| r.is_finite() && *r > 0.0).unwrap_or(DEFAULT_MARKER_RADIUS))
}

/// Assign `number = position + 1` to every marker, keeping list order.
#[must_use]
pub fn renumber(markers: Vec<Marker>) -> Vec<Marker> {
    markers
        .into_iter()
        .zip(1_u32..)
        .map(|(marker, number)| Marker { number, ..marker })
        .collect()
}

/// Ordered markers of one puzzle. List order is hit-test priority and
/// numbering order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerList {
    markers: Vec<Marker>,
}

impl MarkerList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Marker> {
        self.markers.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Marker] {
        &self.markers
    }

    #[must_use]
    pub fn get(&self, id: &MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| &m.id == id)
    }

    pub fn get_mut(&mut self, id: &MarkerId) -> Option<&mut Marker> {
        self.markers.iter_mut().find(|m| &m.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &MarkerId) -> bool {
        self.get(id).is_some()
    }

    /// Append to the end of the list (topmost in draw order, last in hit order).
    pub fn push(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Remove a marker by id, returning it if it was present. Numbers of the
    /// remaining markers are left stale until the next [`MarkerList::renumber`].
    pub fn remove(&mut self, id: &MarkerId) -> Option<Marker> {
        let index = self.markers.iter().position(|m| &m.id == id)?;
        Some(self.markers.remove(index))
    }

    /// Renumber in place; see [`renumber`].
    pub fn renumber(&mut self) {
        self.markers = renumber(std::mem::take(&mut self.markers));
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Marker> {
        self.markers
    }
}

impl From<Vec<Marker>> for MarkerList {
    fn from(markers: Vec<Marker>) -> Self {
        Self { markers }
    }
}

impl<'a> IntoIterator for &'a MarkerList {
    type Item = &'a Marker;
    type IntoIter = std::slice::Iter<'a, Marker>;

    fn into_iter(self) -> Self::IntoIter {
        self.markers.iter()
    }
}

/// An annotated photograph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    pub id: PuzzleId,
    pub name: String,
    /// Opaque image reference (URL or blob URL); never interpreted here.
    pub image_url: String,
    #[serde(rename = "circles", default)]
    pub markers: MarkerList,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Puzzle {
    /// A puzzle with no markers yet.
    #[must_use]
    pub fn new(id: impl Into<PuzzleId>, name: impl Into<String>, image_url: impl Into<String>, created_at: OffsetDateTime) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: image_url.into(),
            markers: MarkerList::new(),
            created_at,
        }
    }

    /// Copy of this puzzle with `markers` renumbered 1..N.
    #[must_use]
    pub fn renumbered(&self) -> Self {
        let mut puzzle = self.clone();
        puzzle.markers.renumber();
        puzzle
    }
}

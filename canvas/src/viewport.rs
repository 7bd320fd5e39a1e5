//! Viewport math: the similarity transform between image pixels and screen pixels.
//!
//! The whole engine works in two coordinate systems. Marker positions and
//! radii live in *image space* (source photo pixels, origin top-left) so they
//! survive any amount of pan and zoom. Pointer events arrive in *screen
//! space* (CSS pixels relative to the container). [`ViewTransform`] maps one
//! to the other with `screen = image * scale + offset`; there is no rotation.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or image space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Width and height, used for both the natural image size and the container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether `p` lies in `[0, width] x [0, height]`, edges included.
    #[must_use]
    pub fn contains(self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

/// Inclusive range a transform's scale is held to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl ScaleBounds {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn clamp(self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

/// The pan/zoom state: `screen = image * scale + offset`.
///
/// Created by [`ViewTransform::fit`] once the image has loaded and replaced
/// wholesale on every later fit. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self { scale: 1.0, offset_x: 0.0, offset_y: 0.0 }
    }
}

impl ViewTransform {
    /// Fit `image` inside `container`, centered, never above 100% before the
    /// margin is applied.
    ///
    /// `scale = min(cw/iw, ch/ih, 1) * margin`, `offset = (container - image*scale) / 2`.
    /// A container that has not been laid out yet (zero or non-finite ratio)
    /// falls back to `bounds.min` so the scale stays a safe divisor.
    #[must_use]
    pub fn fit(image: Size, container: Size, margin: f64, bounds: ScaleBounds) -> Self {
        let fitted = (container.width / image.width)
            .min(container.height / image.height)
            .min(1.0)
            * margin;
        let scale = if fitted.is_finite() && fitted > 0.0 { fitted } else { bounds.min };
        Self {
            scale,
            offset_x: (container.width - image.width * scale) / 2.0,
            offset_y: (container.height - image.height * scale) / 2.0,
        }
    }

    /// Convert an image-space point to screen coordinates.
    #[must_use]
    pub fn to_screen(&self, image: Point) -> Point {
        Point {
            x: image.x * self.scale + self.offset_x,
            y: image.y * self.scale + self.offset_y,
        }
    }

    /// Convert a screen-space point to image coordinates.
    #[must_use]
    pub fn to_image(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset_x) / self.scale,
            y: (screen.y - self.offset_y) / self.scale,
        }
    }

    /// Convert a screen-space distance to an image-space distance.
    #[must_use]
    pub fn screen_dist_to_image(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Zoom by `factor` keeping the image point under `screen` fixed.
    ///
    /// The factor is applied before clamping, and the offset is derived from
    /// the clamped scale, so calls at a bound leave the scale unchanged and
    /// the offset consistent with it.
    #[must_use]
    pub fn zoom_at(&self, screen: Point, factor: f64, bounds: ScaleBounds) -> Self {
        let scale = bounds.clamp(self.scale * factor);
        let ratio = scale / self.scale;
        Self {
            scale,
            offset_x: screen.x - (screen.x - self.offset_x) * ratio,
            offset_y: screen.y - (screen.y - self.offset_y) * ratio,
        }
    }

    /// Zoom by `factor` without re-anchoring: the offset is left alone, so the
    /// image grows and shrinks around the screen origin.
    #[must_use]
    pub fn zoom_by(&self, factor: f64, bounds: ScaleBounds) -> Self {
        Self { scale: bounds.clamp(self.scale * factor), ..*self }
    }

    /// Shift the image by a screen-space delta. Offsets are unbounded.
    #[must_use]
    pub fn pan(&self, delta: Point) -> Self {
        Self {
            offset_x: self.offset_x + delta.x,
            offset_y: self.offset_y + delta.y,
            ..*self
        }
    }

    /// The offset as a point, for grab-delta arithmetic while panning.
    #[must_use]
    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    /// Same scale, offset replaced.
    #[must_use]
    pub fn with_offset(&self, offset: Point) -> Self {
        Self { offset_x: offset.x, offset_y: offset.y, ..*self }
    }
}

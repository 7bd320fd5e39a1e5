//! Viewer vs editor: the single capability switch of the shared engine.
//!
//! Both façades run the same transform, hit-test and gesture code. They
//! differ only in the constants and permissions exposed here.

#[cfg(test)]
#[path = "mode_test.rs"]
mod mode_test;

use crate::consts::{
    EDITOR_FIT_MARGIN, EDITOR_MIN_SCALE, EDITOR_RING_OFFSET_PX, MAX_SCALE, VIEWER_FIT_MARGIN, VIEWER_MIN_SCALE,
    VIEWER_RING_OFFSET_PX,
};
use crate::viewport::ScaleBounds;

/// Which façade the engine is serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Read-only pan/zoom plus single-marker selection.
    #[default]
    Viewer,
    /// Full annotation: create, move, resize, delete, renumber.
    Editor,
}

impl Mode {
    /// Whether the marker set may be mutated.
    #[must_use]
    pub fn can_edit(self) -> bool {
        matches!(self, Self::Editor)
    }

    /// Fraction of the fitted scale actually used at fit time.
    #[must_use]
    pub fn fit_margin(self) -> f64 {
        match self {
            Self::Viewer => VIEWER_FIT_MARGIN,
            Self::Editor => EDITOR_FIT_MARGIN,
        }
    }

    #[must_use]
    pub fn scale_bounds(self) -> ScaleBounds {
        match self {
            Self::Viewer => ScaleBounds::new(VIEWER_MIN_SCALE, MAX_SCALE),
            Self::Editor => ScaleBounds::new(EDITOR_MIN_SCALE, MAX_SCALE),
        }
    }

    /// Distance of the dashed selection ring from the marker rim, in screen pixels.
    #[must_use]
    pub fn ring_offset_px(self) -> f64 {
        match self {
            Self::Viewer => VIEWER_RING_OFFSET_PX,
            Self::Editor => EDITOR_RING_OFFSET_PX,
        }
    }
}

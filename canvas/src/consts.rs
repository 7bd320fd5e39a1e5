//! Shared numeric constants for the canvas crate.

// ── Markers ─────────────────────────────────────────────────────

/// Radius in image pixels given to a newly created marker, and to persisted
/// markers that carry no radius.
pub const DEFAULT_MARKER_RADIUS: f64 = 20.0;

/// Smallest radius reachable by dragging the resize handle.
pub const MIN_MARKER_RADIUS: f64 = 10.0;

/// Largest radius reachable by dragging the resize handle.
pub const MAX_MARKER_RADIUS: f64 = 50.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Gap between a marker's rim and its resize handle center, in screen pixels.
pub const HANDLE_OFFSET_PX: f64 = 8.0;

/// Hit radius (and drawn radius) of the resize handle, in screen pixels.
pub const HANDLE_RADIUS_PX: f64 = 6.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Upper scale bound shared by both modes.
pub const MAX_SCALE: f64 = 5.0;

/// Lower scale bound in the editor.
pub const EDITOR_MIN_SCALE: f64 = 0.1;

/// Lower scale bound in the viewer.
pub const VIEWER_MIN_SCALE: f64 = 0.2;

/// Wheel factor when scrolling toward the user (`dy > 0`).
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Wheel factor for every other wheel event.
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Factor applied by the zoom-in command.
pub const BUTTON_ZOOM_IN: f64 = 1.2;

/// Factor applied by the zoom-out command.
pub const BUTTON_ZOOM_OUT: f64 = 0.8;

// ── Fit ─────────────────────────────────────────────────────────

/// Share of the container the image fills after fit in the editor.
pub const EDITOR_FIT_MARGIN: f64 = 0.8;

/// Share of the container the image fills after fit in the viewer.
pub const VIEWER_FIT_MARGIN: f64 = 0.9;

// ── Rendering ───────────────────────────────────────────────────

/// Dashed selection ring distance from the rim in the editor, screen pixels.
pub const EDITOR_RING_OFFSET_PX: f64 = 8.0;

/// Dashed selection ring distance from the rim in the viewer, screen pixels.
pub const VIEWER_RING_OFFSET_PX: f64 = 5.0;

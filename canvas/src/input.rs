//! Input model: buttons, modifier keys, wheel deltas, and the gesture state machine.
//!
//! `Button` and `Modifiers` capture the user's intent at the time of a
//! pointer event. `Gesture` is the active interaction tracked between
//! pointer-down and pointer-up/leave, carrying the context needed to turn the
//! next pointer-move into a transform or marker update. `Event` is the whole
//! input alphabet of [`crate::engine::EngineCore::dispatch`].

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::{MarkerId, Puzzle};
use crate::session::SessionContext;
use crate::viewport::{Point, Size};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Whether this key removes the selected marker in the editor.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Pointer cursor the host should show over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Viewer idle: the image can be grabbed.
    Grab,
    /// Any pan, drag or resize in progress.
    Grabbing,
    /// Viewer locked after submission.
    NotAllowed,
    /// Editor idle: clicks place markers.
    Crosshair,
}

impl Cursor {
    /// CSS `cursor` value.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
            Self::NotAllowed => "not-allowed",
            Self::Crosshair => "crosshair",
        }
    }
}

/// Session UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected marker, if any.
    pub selected_id: Option<MarkerId>,
    /// Viewer only: the selection has been submitted and is frozen.
    pub locked: bool,
}

/// The active pointer gesture. Exactly one is active at a time.
///
/// Each active variant carries the context needed to apply the next
/// pointer-move. Mutations are applied on every move, so pointer-up has
/// nothing to commit.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Dragging the image.
    Panning {
        /// Pointer position minus transform offset at pointer-down; each move
        /// sets `offset = pointer - grab`.
        grab: Point,
    },
    /// Moving the selected marker.
    DraggingMarker {
        id: MarkerId,
        /// Screen position of the previous pointer event, for incremental deltas.
        last_screen: Point,
    },
    /// Dragging the selected marker's resize handle. The new radius is the
    /// pointer's distance from the center, so no down-point is kept.
    ResizingMarker { id: MarkerId },
}

impl Gesture {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Every input the engine reacts to.
#[derive(Debug, Clone)]
pub enum Event {
    PointerDown { screen: Point, button: Button, modifiers: Modifiers },
    PointerMove { screen: Point, modifiers: Modifiers },
    PointerUp { screen: Point, button: Button, modifiers: Modifiers },
    PointerLeave,
    Click { screen: Point, modifiers: Modifiers },
    Wheel { screen: Point, delta: WheelDelta, modifiers: Modifiers },
    KeyDown { key: Key, modifiers: Modifiers },
    ZoomIn,
    ZoomOut,
    ResetView,
    DeleteSelected,
    Save,
    Submit(SessionContext),
    SetLocked(bool),
    LoadPuzzle(Puzzle),
    BeginImageLoad,
    ImageLoaded(Size),
    Viewport { width: f64, height: f64, dpr: f64 },
}

impl Event {
    /// Whether the browser wrapper must handle this event itself because it
    /// changes the canvas element or the held image. The core alone can take
    /// every other event.
    #[must_use]
    pub fn needs_host(&self) -> bool {
        matches!(
            self,
            Self::LoadPuzzle(_) | Self::BeginImageLoad | Self::ImageLoaded(_) | Self::Viewport { .. }
        )
    }
}

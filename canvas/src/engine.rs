use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::consts::{
    BUTTON_ZOOM_IN, BUTTON_ZOOM_OUT, DEFAULT_MARKER_RADIUS, MAX_MARKER_RADIUS, MIN_MARKER_RADIUS, WHEEL_ZOOM_IN,
    WHEEL_ZOOM_OUT,
};
use crate::doc::{Marker, MarkerId, MarkerList, Puzzle};
use crate::hit::{Hit, HitPart, hit_test, marker_at};
use crate::input::{Button, Cursor, Event, Gesture, Key, Modifiers, UiState, WheelDelta};
use crate::mode::Mode;
use crate::render;
use crate::session::{SelectionSubmission, SessionContext};
use crate::viewport::{Point, Size, ViewTransform};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    TransformChanged(ViewTransform),
    SelectionChanged(Option<MarkerId>),
    MarkerCreated(Marker),
    MarkerUpdated(Marker),
    MarkerDeleted { id: MarkerId },
    /// Renumbered puzzle for the persistence service.
    SavePuzzle(Puzzle),
    SelectionSubmitted(SelectionSubmission),
    SetCursor(Cursor),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Events are processed strictly in arrival order; any event that does not
/// fit the current state (a move with no gesture, an up with no down, any
/// pointer input before the image has loaded) returns no actions.
pub struct EngineCore {
    pub mode: Mode,
    pub puzzle: Puzzle,
    pub transform: ViewTransform,
    pub ui: UiState,
    pub input: Gesture,
    /// Natural image size; `None` until the image has loaded.
    pub image: Option<Size>,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl EngineCore {
    #[must_use]
    pub fn new(mode: Mode, puzzle: Puzzle) -> Self {
        Self {
            mode,
            puzzle,
            transform: ViewTransform::default(),
            ui: UiState::default(),
            input: Gesture::default(),
            image: None,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }

    /// Read-only engine for competitors.
    #[must_use]
    pub fn viewer(puzzle: Puzzle) -> Self {
        Self::new(Mode::Viewer, puzzle)
    }

    /// Read-write engine for puzzle authors.
    #[must_use]
    pub fn editor(puzzle: Puzzle) -> Self {
        Self::new(Mode::Editor, puzzle)
    }

    /// Apply one event. Every public handler below is reachable through here.
    pub fn dispatch(&mut self, event: Event) -> Vec<Action> {
        match event {
            Event::PointerDown { screen, button, modifiers } => self.on_pointer_down(screen, button, modifiers),
            Event::PointerMove { screen, modifiers } => self.on_pointer_move(screen, modifiers),
            Event::PointerUp { screen, button, modifiers } => self.on_pointer_up(screen, button, modifiers),
            Event::PointerLeave => self.on_pointer_leave(),
            Event::Click { screen, modifiers } => self.on_click(screen, modifiers),
            Event::Wheel { screen, delta, modifiers } => self.on_wheel(screen, delta, modifiers),
            Event::KeyDown { key, modifiers } => self.on_key_down(&key, modifiers),
            Event::ZoomIn => self.zoom_in(),
            Event::ZoomOut => self.zoom_out(),
            Event::ResetView => self.reset_view(),
            Event::DeleteSelected => self.delete_selected(),
            Event::Save => self.save(),
            Event::Submit(session) => self.submit(&session),
            Event::SetLocked(locked) => self.set_locked(locked),
            Event::LoadPuzzle(puzzle) => self.load_puzzle(puzzle),
            Event::BeginImageLoad => self.begin_image_load(),
            Event::ImageLoaded(size) => self.image_loaded(size),
            Event::Viewport { width, height, dpr } => self.set_viewport(width, height, dpr),
        }
    }

    // --- Data / lifecycle ---

    /// Replace the puzzle. Selection and gesture are dropped and the image
    /// must load again before interaction resumes.
    pub fn load_puzzle(&mut self, puzzle: Puzzle) -> Vec<Action> {
        self.puzzle = puzzle;
        self.ui = UiState::default();
        self.input = Gesture::Idle;
        self.image = None;
        vec![Action::SelectionChanged(None), Action::RenderNeeded]
    }

    /// The image reference changed and a new load started.
    pub fn begin_image_load(&mut self) -> Vec<Action> {
        self.image = None;
        self.input = Gesture::Idle;
        vec![Action::RenderNeeded]
    }

    /// The image finished loading: fit it to the container, replacing
    /// whatever transform was there.
    pub fn image_loaded(&mut self, natural: Size) -> Vec<Action> {
        self.image = Some(natural);
        self.transform = self.fitted(natural);
        vec![
            Action::TransformChanged(self.transform),
            Action::SetCursor(self.cursor()),
            Action::RenderNeeded,
        ]
    }

    /// Update container dimensions and device pixel ratio. Does not refit.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
        vec![Action::RenderNeeded]
    }

    fn fitted(&self, natural: Size) -> ViewTransform {
        let container = Size::new(self.viewport_width, self.viewport_height);
        ViewTransform::fit(natural, container, self.mode.fit_margin(), self.mode.scale_bounds())
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if !self.is_image_loaded() {
            return Vec::new();
        }
        let before = self.cursor();
        self.input = Gesture::Idle;

        match self.mode {
            Mode::Viewer => self.start_pan(screen_pt),
            Mode::Editor => {
                let selected = self.ui.selected_id.clone();
                match hit_test(screen_pt, &self.puzzle.markers, &self.transform, selected.as_ref()) {
                    Some(Hit { marker_id, part: HitPart::ResizeHandle }) => {
                        self.input = Gesture::ResizingMarker { id: marker_id };
                    }
                    Some(Hit { marker_id, part: HitPart::Body }) if selected.as_ref() == Some(&marker_id) => {
                        self.input = Gesture::DraggingMarker { id: marker_id, last_screen: screen_pt };
                    }
                    _ if button == Button::Secondary || modifiers.ctrl => self.start_pan(screen_pt),
                    _ => {}
                }
            }
        }

        self.cursor_actions(before)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        if !self.is_image_loaded() {
            return Vec::new();
        }
        match self.input.clone() {
            Gesture::Idle => Vec::new(),
            Gesture::Panning { grab } => {
                self.transform = self
                    .transform
                    .with_offset(Point::new(screen_pt.x - grab.x, screen_pt.y - grab.y));
                vec![Action::TransformChanged(self.transform), Action::RenderNeeded]
            }
            Gesture::DraggingMarker { id, last_screen } => {
                let scale = self.transform.scale;
                let Some(marker) = self.puzzle.markers.get_mut(&id) else {
                    self.input = Gesture::Idle;
                    return Vec::new();
                };
                marker.x += (screen_pt.x - last_screen.x) / scale;
                marker.y += (screen_pt.y - last_screen.y) / scale;
                let updated = marker.clone();
                self.input = Gesture::DraggingMarker { id, last_screen: screen_pt };
                vec![Action::MarkerUpdated(updated), Action::RenderNeeded]
            }
            Gesture::ResizingMarker { id } => {
                let transform = self.transform;
                let Some(marker) = self.puzzle.markers.get_mut(&id) else {
                    self.input = Gesture::Idle;
                    return Vec::new();
                };
                let center = transform.to_screen(marker.center());
                marker.radius = transform
                    .screen_dist_to_image(screen_pt.distance(center))
                    .clamp(MIN_MARKER_RADIUS, MAX_MARKER_RADIUS);
                vec![Action::MarkerUpdated(marker.clone()), Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.end_gesture()
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    /// A click arrives after pointer-up, whatever the gesture did.
    pub fn on_click(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let Some(image) = self.image else {
            return Vec::new();
        };
        match self.mode {
            Mode::Viewer => {
                if self.ui.locked {
                    return Vec::new();
                }
                let hit = marker_at(screen_pt, &self.puzzle.markers, &self.transform).map(|m| m.id.clone());
                let next = self.toggled(hit);
                self.select(next)
            }
            Mode::Editor => {
                let selected = self.ui.selected_id.clone();
                match hit_test(screen_pt, &self.puzzle.markers, &self.transform, selected.as_ref()) {
                    Some(Hit { part: HitPart::ResizeHandle, .. }) => Vec::new(),
                    Some(Hit { marker_id, part: HitPart::Body }) => {
                        let next = self.toggled(Some(marker_id));
                        self.select(next)
                    }
                    None => {
                        let image_pt = self.transform.to_image(screen_pt);
                        if image.contains(image_pt) { self.create_marker(image_pt) } else { Vec::new() }
                    }
                }
            }
        }
    }

    /// Wheel zoom toward the cursor. Independent of the gesture state.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        if !self.is_image_loaded() {
            return Vec::new();
        }
        let factor = if delta.dy > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
        self.transform = self.transform.zoom_at(screen_pt, factor, self.mode.scale_bounds());
        vec![Action::TransformChanged(self.transform), Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if self.mode.can_edit() && key.is_delete() {
            return self.delete_selected();
        }
        Vec::new()
    }

    // --- Commands ---

    /// Zoom in around the screen origin (no cursor anchoring).
    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom_by(BUTTON_ZOOM_IN)
    }

    /// Zoom out around the screen origin (no cursor anchoring).
    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.zoom_by(BUTTON_ZOOM_OUT)
    }

    fn zoom_by(&mut self, factor: f64) -> Vec<Action> {
        if !self.is_image_loaded() {
            return Vec::new();
        }
        self.transform = self.transform.zoom_by(factor, self.mode.scale_bounds());
        vec![Action::TransformChanged(self.transform), Action::RenderNeeded]
    }

    /// Re-fit the image to the container.
    pub fn reset_view(&mut self) -> Vec<Action> {
        let Some(natural) = self.image else {
            return Vec::new();
        };
        self.transform = self.fitted(natural);
        vec![Action::TransformChanged(self.transform), Action::RenderNeeded]
    }

    /// Editor: remove the selected marker and clear the selection.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        if !self.mode.can_edit() {
            return Vec::new();
        }
        let Some(id) = self.ui.selected_id.take() else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        if self.puzzle.markers.remove(&id).is_some() {
            actions.push(Action::MarkerDeleted { id: id.clone() });
        }
        if self.gesture_targets(&id) {
            self.input = Gesture::Idle;
        }
        actions.push(Action::SelectionChanged(None));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Editor: renumber markers 1..N in list order and hand the puzzle to
    /// the persistence service.
    pub fn save(&mut self) -> Vec<Action> {
        if !self.mode.can_edit() {
            return Vec::new();
        }
        self.puzzle.markers.renumber();
        vec![Action::SavePuzzle(self.puzzle.clone()), Action::RenderNeeded]
    }

    /// Viewer: submit the current selection and freeze it.
    pub fn submit(&mut self, session: &SessionContext) -> Vec<Action> {
        if self.mode.can_edit() || self.ui.locked {
            return Vec::new();
        }
        let Some(marker_id) = self.ui.selected_id.clone() else {
            return Vec::new();
        };
        let before = self.cursor();
        self.ui.locked = true;
        let mut actions = vec![Action::SelectionSubmitted(SelectionSubmission {
            puzzle_id: self.puzzle.id.clone(),
            marker_id,
            climber_name: session.climber_name().to_owned(),
        })];
        actions.extend(self.cursor_actions(before));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Viewer: freeze or unfreeze selection. Pan and zoom stay available.
    pub fn set_locked(&mut self, locked: bool) -> Vec<Action> {
        if self.mode.can_edit() {
            return Vec::new();
        }
        let before = self.cursor();
        self.ui.locked = locked;
        self.cursor_actions(before)
    }

    // --- Helpers ---

    fn start_pan(&mut self, screen_pt: Point) {
        let offset = self.transform.offset();
        self.input = Gesture::Panning { grab: Point::new(screen_pt.x - offset.x, screen_pt.y - offset.y) };
    }

    fn end_gesture(&mut self) -> Vec<Action> {
        if self.input.is_idle() {
            return Vec::new();
        }
        let before = self.cursor();
        self.input = Gesture::Idle;
        self.cursor_actions(before)
    }

    fn gesture_targets(&self, id: &MarkerId) -> bool {
        match &self.input {
            Gesture::DraggingMarker { id: target, .. } | Gesture::ResizingMarker { id: target } => target == id,
            Gesture::Idle | Gesture::Panning { .. } => false,
        }
    }

    /// Clicking the selected marker deselects it; any other hit selects;
    /// no hit deselects.
    fn toggled(&self, hit: Option<MarkerId>) -> Option<MarkerId> {
        match hit {
            Some(id) if self.ui.selected_id.as_ref() == Some(&id) => None,
            other => other,
        }
    }

    fn select(&mut self, next: Option<MarkerId>) -> Vec<Action> {
        if self.ui.selected_id == next {
            return Vec::new();
        }
        self.ui.selected_id = next.clone();
        vec![Action::SelectionChanged(next), Action::RenderNeeded]
    }

    fn create_marker(&mut self, image_pt: Point) -> Vec<Action> {
        let number = u32::try_from(self.puzzle.markers.len() + 1).unwrap_or(u32::MAX);
        let marker = Marker::new(MarkerId::generate(), image_pt, DEFAULT_MARKER_RADIUS, number);
        let id = marker.id.clone();
        self.puzzle.markers.push(marker.clone());
        self.ui.selected_id = Some(id.clone());
        vec![Action::MarkerCreated(marker), Action::SelectionChanged(Some(id)), Action::RenderNeeded]
    }

    fn cursor_actions(&self, before: Cursor) -> Vec<Action> {
        let after = self.cursor();
        if after == before { Vec::new() } else { vec![Action::SetCursor(after)] }
    }

    // --- Queries ---

    /// The currently selected marker id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&MarkerId> {
        self.ui.selected_id.as_ref()
    }

    /// The currently selected marker, if it still exists.
    #[must_use]
    pub fn selected_marker(&self) -> Option<&Marker> {
        self.ui.selected_id.as_ref().and_then(|id| self.puzzle.markers.get(id))
    }

    /// The current transform.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    #[must_use]
    pub fn markers(&self) -> &MarkerList {
        &self.puzzle.markers
    }

    /// Look up a marker by id.
    #[must_use]
    pub fn marker(&self, id: &MarkerId) -> Option<&Marker> {
        self.puzzle.markers.get(id)
    }

    #[must_use]
    pub fn gesture(&self) -> &Gesture {
        &self.input
    }

    #[must_use]
    pub fn is_image_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// Scale as a whole percentage, for the zoom readout.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn zoom_percent(&self) -> u32 {
        (self.transform.scale * 100.0).round() as u32
    }

    /// Cursor matching the current mode, lock and gesture.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        if !self.input.is_idle() {
            return Cursor::Grabbing;
        }
        match self.mode {
            Mode::Viewer if self.ui.locked => Cursor::NotAllowed,
            Mode::Viewer => Cursor::Grab,
            Mode::Editor => Cursor::Crosshair,
        }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas
/// element and the loaded image.
pub struct Engine {
    canvas: HtmlCanvasElement,
    image: Option<HtmlImageElement>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, mode: Mode, puzzle: Puzzle) -> Self {
        Self { canvas, image: None, core: EngineCore::new(mode, puzzle) }
    }

    // --- Lifecycle ---

    pub fn load_puzzle(&mut self, puzzle: Puzzle) -> Vec<Action> {
        self.image = None;
        self.core.load_puzzle(puzzle)
    }

    pub fn begin_image_load(&mut self) -> Vec<Action> {
        self.image = None;
        self.core.begin_image_load()
    }

    /// Hand over the image once its `load` event fired.
    pub fn image_loaded(&mut self, image: HtmlImageElement) -> Vec<Action> {
        let natural = Size::new(f64::from(image.natural_width()), f64::from(image.natural_height()));
        self.image = Some(image);
        self.core.image_loaded(natural)
    }

    /// Update viewport dimensions and device pixel ratio, resizing the backing store.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.canvas.set_width((width_css * dpr).round() as u32);
        self.canvas.set_height((height_css * dpr).round() as u32);
        self.core.set_viewport(width_css, height_css, dpr)
    }

    // --- Input events ---

    /// Lifecycle events that touch the canvas or the held image go through
    /// the wrapper; everything else is forwarded to the core.
    ///
    /// `Event::ImageLoaded` is ignored here: the decoded element only arrives
    /// through [`Engine::image_loaded`], and a bare size would mark the core
    /// loaded while `render` still has nothing to draw.
    pub fn dispatch(&mut self, event: Event) -> Vec<Action> {
        if !event.needs_host() {
            return self.core.dispatch(event);
        }
        match event {
            Event::LoadPuzzle(puzzle) => self.load_puzzle(puzzle),
            Event::BeginImageLoad => self.begin_image_load(),
            Event::Viewport { width, height, dpr } => self.set_viewport(width, height, dpr),
            _ => Vec::new(),
        }
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_click(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_click(screen_pt, modifiers)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context cannot be obtained or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let Some(context) = self.canvas.get_context("2d")? else {
            return Ok(());
        };
        let ctx: CanvasRenderingContext2d = context.dyn_into()?;
        render::draw(&ctx, self.image.as_ref(), &self.core)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<&MarkerId> {
        self.core.selection()
    }

    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.core.transform()
    }

    #[must_use]
    pub fn marker(&self, id: &MarkerId) -> Option<&Marker> {
        self.core.marker(id)
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.core.cursor()
    }
}

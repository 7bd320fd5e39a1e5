//! Rendering: draws the image and its markers to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only view of [`EngineCore`] and produces pixels; it
//! does not mutate any application state.
//!
//! Drawing happens in two steps. [`scene`] projects every marker to screen
//! space with the same geometry hit-testing uses and resolves mode styling.
//! [`draw`] then replays that list onto the context. Only the second step
//! needs a browser.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::MarkerId;
use crate::engine::EngineCore;
use crate::hit::{ScreenCircle, resize_handle_center, screen_circle};
use crate::mode::Mode;
use crate::viewport::Point;

/// Selection ring dash pattern in screen pixels.
const RING_DASH_PX: f64 = 5.0;

const LABEL_COLOR: &str = "#fff";
const HANDLE_FILL: &str = "#fff";
const HANDLE_STROKE: &str = "hsla(14, 85%, 55%, 1)";
const HANDLE_LINE_WIDTH: f64 = 2.0;

/// Fill and outline of one marker state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub line_width: f64,
}

const VIEWER_MARKER: Paint = Paint { fill: "#e74c3c", stroke: "#c0392b", line_width: 2.0 };
const VIEWER_SELECTED: Paint = Paint { fill: "#ff6b35", stroke: "#fff", line_width: 3.0 };
const EDITOR_MARKER: Paint = Paint { fill: "hsla(0, 85%, 55%, 0.7)", stroke: "hsla(195, 62%, 30%, 0.9)", line_width: 2.0 };
const EDITOR_SELECTED: Paint = Paint { fill: "hsla(14, 85%, 55%, 0.8)", stroke: "#fff", line_width: 3.0 };

/// Dashed ring drawn around the selected marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub radius: f64,
    pub line_width: f64,
}

/// One marker as it appears on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSprite {
    pub id: MarkerId,
    pub circle: ScreenCircle,
    pub paint: Paint,
    pub label: String,
    /// Label font size in screen pixels.
    pub font_px: f64,
    pub ring: Option<Ring>,
    /// Editor only: center of the resize handle of the selected marker.
    pub handle: Option<Point>,
}

/// Label font size for the current zoom. The editor keeps labels legible
/// when zoomed far out; the viewer scales them with the image.
#[must_use]
pub fn label_font_px(mode: Mode, scale: f64) -> f64 {
    match mode {
        Mode::Viewer => 16.0 * scale,
        Mode::Editor => (14.0 * scale).max(12.0),
    }
}

fn paint_for(mode: Mode, selected: bool) -> Paint {
    match (mode, selected) {
        (Mode::Viewer, false) => VIEWER_MARKER,
        (Mode::Viewer, true) => VIEWER_SELECTED,
        (Mode::Editor, false) => EDITOR_MARKER,
        (Mode::Editor, true) => EDITOR_SELECTED,
    }
}

/// Project every marker to screen space in list order (later markers paint on top).
#[must_use]
pub fn scene(core: &EngineCore) -> Vec<MarkerSprite> {
    let transform = core.transform();
    let selected = core.selection();
    let font_px = label_font_px(core.mode, transform.scale);

    core.markers()
        .iter()
        .map(|marker| {
            let is_selected = selected == Some(&marker.id);
            let circle = screen_circle(marker, &transform);
            let paint = paint_for(core.mode, is_selected);
            let ring = is_selected.then(|| Ring {
                radius: circle.radius + core.mode.ring_offset_px(),
                line_width: if core.mode.can_edit() { 2.0 } else { 3.0 },
            });
            let handle = (is_selected && core.mode.can_edit()).then(|| resize_handle_center(marker, &transform));
            MarkerSprite {
                id: marker.id.clone(),
                circle,
                paint,
                label: marker.number.to_string(),
                font_px,
                ring,
                handle,
            }
        })
        .collect()
}

/// Draw the full frame: image, then markers.
///
/// Nothing but the clear happens until the image has loaded.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, image: Option<&HtmlImageElement>, core: &EngineCore) -> Result<(), JsValue> {
    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, core.viewport_width, core.viewport_height);

    let (Some(image), Some(natural)) = (image, core.image) else {
        return Ok(());
    };

    let t = core.transform();
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        image,
        t.offset_x,
        t.offset_y,
        natural.width * t.scale,
        natural.height * t.scale,
    )?;

    for sprite in scene(core) {
        draw_sprite(ctx, &sprite)?;
    }
    Ok(())
}

// =============================================================
// Sprite layers
// =============================================================

fn draw_sprite(ctx: &CanvasRenderingContext2d, sprite: &MarkerSprite) -> Result<(), JsValue> {
    let ScreenCircle { center, radius } = sprite.circle;

    ctx.begin_path();
    ctx.arc(center.x, center.y, radius, 0.0, TAU)?;
    ctx.set_fill_style_str(sprite.paint.fill);
    ctx.fill();
    ctx.set_stroke_style_str(sprite.paint.stroke);
    ctx.set_line_width(sprite.paint.line_width);
    ctx.stroke();

    ctx.set_fill_style_str(LABEL_COLOR);
    ctx.set_font(&format!("bold {}px Arial", sprite.font_px));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(&sprite.label, center.x, center.y)?;

    if let Some(ring) = sprite.ring {
        draw_ring(ctx, center, ring)?;
    }
    if let Some(handle) = sprite.handle {
        draw_handle(ctx, handle)?;
    }
    Ok(())
}

fn draw_ring(ctx: &CanvasRenderingContext2d, center: Point, ring: Ring) -> Result<(), JsValue> {
    let dash = js_sys::Array::new();
    dash.push(&RING_DASH_PX.into());
    dash.push(&RING_DASH_PX.into());
    ctx.begin_path();
    ctx.arc(center.x, center.y, ring.radius, 0.0, TAU)?;
    ctx.set_stroke_style_str(LABEL_COLOR);
    ctx.set_line_width(ring.line_width);
    ctx.set_line_dash(&dash)?;
    ctx.stroke();
    ctx.set_line_dash(&js_sys::Array::new())?;
    Ok(())
}

fn draw_handle(ctx: &CanvasRenderingContext2d, center: Point) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(center.x, center.y, HANDLE_RADIUS_PX, 0.0, TAU)?;
    ctx.set_fill_style_str(HANDLE_FILL);
    ctx.fill();
    ctx.set_stroke_style_str(HANDLE_STROKE);
    ctx.set_line_width(HANDLE_LINE_WIDTH);
    ctx.stroke();
    Ok(())
}

//! Rendering: turns the scene and camera into an ordered list of screen-space
//! draw commands.
//!
//! This module never touches a drawing surface. It receives read-only views of
//! the scene, layer filter, and camera and produces a [`DrawCommand`] list that
//! any 2D backend can replay in order. It does not mutate application state.
//!
//! Draw order is fixed: background clear, walls, rect-likes (each followed by
//! its label when labels are shown), then the search highlight outline on top.
//! Only objects whose AABB intersects the visible world rectangle are emitted.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::camera::Camera;
use crate::color::hex_with_alpha;
use crate::cull::{LayerFilter, visible_objects};
use crate::doc::{SceneObject, SceneStore, Shape};
use crate::geometry::{Aabb, Point};

/// Viewport background color.
pub const BACKGROUND: &str = "#ffffff";

/// Wall stroke color and width in screen pixels.
pub const WALL_STROKE: &str = "#111827";
pub const WALL_WIDTH_PX: f64 = 4.0;

/// Outline width for rect-likes in screen pixels.
pub const RECT_LINE_WIDTH_PX: f64 = 1.5;

/// Label text color.
pub const LABEL_COLOR: &str = "#111827";

/// Label size in world units when the layout gives none, and the floor applied
/// to any given size.
pub const DEFAULT_LABEL_SIZE: f64 = 12.0;
pub const MIN_LABEL_SIZE: f64 = 10.0;

/// Line height as a multiple of the font size.
const LABEL_LINE_HEIGHT: f64 = 1.2;

/// Horizontal room left free inside a rect around its label, in screen pixels.
const LABEL_INSET_PX: f64 = 8.0;

/// Labels wrap to at most this many lines.
const LABEL_MAX_LINES: usize = 2;

/// Search highlight outline.
pub const HIGHLIGHT_STROKE: &str = "#e31e24";
pub const HIGHLIGHT_WIDTH_PX: f64 = 3.0;
pub const HIGHLIGHT_DASH_PX: [f64; 2] = [6.0, 6.0];

const DEFAULT_FILL: &str = "#e5e7eb";
const DEFAULT_STROKE: &str = "#6b7280";
const STORAGE_FILL: &str = "#f3f4f6";
const STORAGE_STROKE: &str = "#9ca3af";
const ZONE_COLOR: &str = "#2563EB";
const ZONE_FILL_ALPHA: f64 = 0.08;

/// One screen-space drawing step. Coordinates are CSS pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    /// Fill the whole viewport.
    #[serde(rename_all = "camelCase")]
    Clear { width: f64, height: f64, color: String },
    /// Stroke a straight segment.
    #[serde(rename_all = "camelCase")]
    Wall { from: Point, to: Point, stroke: String, line_width: f64 },
    /// Fill then stroke a rectangle of `width` x `height` centered on `center`
    /// and rotated by `rotation` radians.
    #[serde(rename_all = "camelCase")]
    Rect {
        center: Point,
        width: f64,
        height: f64,
        rotation: f64,
        fill: String,
        stroke: String,
        line_width: f64,
    },
    /// Centered multi-line text, rotated with its rect. Lines are stacked
    /// `line_height` apart around `center`; each is squeezed to `max_width`.
    #[serde(rename_all = "camelCase")]
    Label {
        center: Point,
        rotation: f64,
        lines: Vec<String>,
        font_px: f64,
        line_height: f64,
        max_width: f64,
        color: String,
    },
    /// Dashed outline around an axis-aligned screen rectangle.
    #[serde(rename_all = "camelCase")]
    Highlight { rect: Aabb, stroke: String, line_width: f64, dash: [f64; 2] },
}

/// Fill and stroke colors for a rect-like object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub fill: String,
    pub stroke: String,
}

/// Resolve the fill/stroke for an object from its type and color.
///
/// Zones tint their fill with the zone color at low alpha and stroke with the
/// full color. Any other object with an explicit color is filled with it.
#[must_use]
pub fn style_for(obj: &SceneObject) -> Style {
    let color = obj.color.as_deref();
    match obj.kind.as_str() {
        "zone" => {
            let c = color.unwrap_or(ZONE_COLOR);
            Style { fill: hex_with_alpha(c, ZONE_FILL_ALPHA), stroke: c.to_owned() }
        }
        kind => {
            let (fill, stroke) = match kind {
                "pallet" | "bin" => (STORAGE_FILL, STORAGE_STROKE),
                _ => (DEFAULT_FILL, DEFAULT_STROKE),
            };
            Style { fill: color.unwrap_or(fill).to_owned(), stroke: stroke.to_owned() }
        }
    }
}

/// Text width measurement used for label wrapping.
pub trait TextMeasure {
    /// Width in pixels of `text` set at `font_px`.
    fn width(&self, text: &str, font_px: f64) -> f64;
}

/// Fixed-advance estimate for hosts without font metrics.
#[derive(Debug, Clone, Copy)]
pub struct ApproxMeasure {
    /// Average glyph advance as a fraction of the font size.
    pub advance: f64,
}

impl Default for ApproxMeasure {
    fn default() -> Self {
        Self { advance: 0.55 }
    }
}

impl TextMeasure for ApproxMeasure {
    #[allow(clippy::cast_precision_loss)]
    fn width(&self, text: &str, font_px: f64) -> f64 {
        text.chars().count() as f64 * font_px * self.advance
    }
}

/// Greedy word wrap into at most `max_lines` lines.
///
/// A single word wider than `max_width` still gets its own line. Words that
/// do not fit in the line budget are appended to the last line, which the
/// backend squeezes to `max_width`.
#[must_use]
pub fn wrap_label(text: &str, max_width: f64, max_lines: usize, font_px: f64, measure: &impl TextMeasure) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        if cur.is_empty() {
            cur.push_str(word);
            continue;
        }
        let candidate = format!("{cur} {word}");
        if lines.len() + 1 >= max_lines || measure.width(&candidate, font_px) <= max_width {
            cur = candidate;
        } else {
            lines.push(std::mem::replace(&mut cur, word.to_owned()));
        }
    }
    if !cur.is_empty() && lines.len() < max_lines {
        lines.push(cur);
    }
    lines
}

/// Label command for a rect drawn at `center` with screen width `screen_w`,
/// or `None` when there is no label or no room for one.
fn label_command(
    obj: &SceneObject,
    center: Point,
    screen_w: f64,
    zoom: f64,
    measure: &impl TextMeasure,
) -> Option<DrawCommand> {
    let label = obj.label.as_deref()?;
    let max_width = screen_w - LABEL_INSET_PX;
    if max_width <= 0.0 {
        return None;
    }
    let base = obj.label_size.unwrap_or(DEFAULT_LABEL_SIZE).max(MIN_LABEL_SIZE);
    let font_px = (base * zoom).round();
    let lines = wrap_label(label, max_width, LABEL_MAX_LINES, font_px, measure);
    if lines.is_empty() {
        return None;
    }
    Some(DrawCommand::Label {
        center,
        rotation: obj.rotation,
        lines,
        font_px,
        line_height: base * zoom * LABEL_LINE_HEIGHT,
        max_width,
        color: LABEL_COLOR.to_owned(),
    })
}

fn rect_commands(obj: &SceneObject, camera: &Camera, show_labels: bool, measure: &impl TextMeasure, out: &mut Vec<DrawCommand>) {
    let Shape::Rect { w, h, .. } = obj.shape else {
        return;
    };
    let center = camera.world_to_screen(obj.center);
    let (width, height) = (w * camera.zoom, h * camera.zoom);
    let Style { fill, stroke } = style_for(obj);
    out.push(DrawCommand::Rect {
        center,
        width,
        height,
        rotation: obj.rotation,
        fill,
        stroke,
        line_width: RECT_LINE_WIDTH_PX,
    });
    if show_labels {
        out.extend(label_command(obj, center, width, camera.zoom, measure));
    }
}

/// Build the draw list for one frame.
///
/// `highlighted` is the id of the current search match, outlined on top of
/// everything else. Labels are emitted only when `camera.zoom` is at least
/// `label_min_zoom`.
#[must_use]
pub fn plan(
    store: &SceneStore,
    layers: &LayerFilter,
    camera: &Camera,
    highlighted: Option<&str>,
    label_min_zoom: f64,
    measure: &impl TextMeasure,
) -> Vec<DrawCommand> {
    let view = camera.visible_world_rect();
    let show_labels = camera.zoom >= label_min_zoom;
    let mut out = vec![DrawCommand::Clear {
        width: camera.viewport_width,
        height: camera.viewport_height,
        color: BACKGROUND.to_owned(),
    }];

    for obj in visible_objects(store, layers, view) {
        if let Shape::Wall { a, b } = obj.shape {
            out.push(DrawCommand::Wall {
                from: camera.world_to_screen(a),
                to: camera.world_to_screen(b),
                stroke: WALL_STROKE.to_owned(),
                line_width: WALL_WIDTH_PX,
            });
        }
    }
    for obj in visible_objects(store, layers, view).filter(|obj| !obj.is_wall()) {
        rect_commands(obj, camera, show_labels, measure, &mut out);
    }

    if let Some(obj) = highlighted.and_then(|id| store.get(id)).filter(|obj| layers.shows(obj)) {
        let rect = Aabb::from_points(
            camera.world_to_screen(Point::new(obj.aabb.min_x, obj.aabb.min_y)),
            camera.world_to_screen(Point::new(obj.aabb.max_x, obj.aabb.max_y)),
        );
        out.push(DrawCommand::Highlight {
            rect,
            stroke: HIGHLIGHT_STROKE.to_owned(),
            line_width: HIGHLIGHT_WIDTH_PX,
            dash: HIGHLIGHT_DASH_PX,
        });
    }
    out
}

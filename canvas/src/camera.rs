//! Pan/zoom camera: the world↔screen transform of the map surface.
//!
//! The forward mapping is `screen = world * zoom + pan`. Every mutator keeps
//! `zoom` inside `[min_zoom, max_zoom]` and refuses inputs that would leave
//! pan or zoom non-finite, so the renderer can trust the state unconditionally.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::Serialize;

use crate::config::ViewerConfig;
use crate::geometry::{Aabb, Point};

/// Camera state for the map surface.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is screen pixels per world unit (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Viewport width in CSS pixels.
    pub viewport_width: f64,
    /// Viewport height in CSS pixels.
    pub viewport_height: f64,
    /// Device pixel ratio used for the backing store.
    pub dpr: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

impl Camera {
    /// Identity camera with the zoom limits from `config`.
    #[must_use]
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0_f64.clamp(config.min_zoom, config.max_zoom),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Clamp `zoom` into this camera's limits.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Screen-space center of the viewport.
    #[must_use]
    pub fn viewport_center(&self) -> Point {
        Point::new(self.viewport_width * 0.5, self.viewport_height * 0.5)
    }

    /// Store the viewport size in CSS pixels and the device pixel ratio.
    ///
    /// Negative or non-finite sizes collapse to zero; the ratio is clamped to `[1, max_dpr]`.
    pub fn set_viewport(&mut self, width: f64, height: f64, dpr: f64, max_dpr: f64) {
        self.viewport_width = finite_or(width, 0.0).max(0.0);
        self.viewport_height = finite_or(height, 0.0).max(0.0);
        self.dpr = finite_or(dpr, 1.0).clamp(1.0, max_dpr.max(1.0));
    }

    /// Backing-store size in device pixels for the current viewport.
    #[must_use]
    pub fn backing_size(&self) -> (f64, f64) {
        ((self.viewport_width * self.dpr).round(), (self.viewport_height * self.dpr).round())
    }

    /// World-space rectangle currently visible in the viewport.
    #[must_use]
    pub fn visible_world_rect(&self) -> Aabb {
        let a = self.screen_to_world(Point::new(0.0, 0.0));
        let b = self.screen_to_world(Point::new(self.viewport_width, self.viewport_height));
        Aabb::from_points(a, b)
    }

    /// Translate the view by a raw screen-space delta. Returns `false` (and
    /// leaves the camera untouched) when the resulting pan would not be finite.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> bool {
        let (pan_x, pan_y) = (self.pan_x + dx, self.pan_y + dy);
        if !(pan_x.is_finite() && pan_y.is_finite()) {
            return false;
        }
        self.pan_x = pan_x;
        self.pan_y = pan_y;
        true
    }

    /// Multiply zoom by `factor`, keeping the world point under `anchor` fixed.
    ///
    /// `anchor` defaults to the viewport center. Returns `false` without
    /// touching the camera when the clamped zoom equals the current zoom
    /// (already at a limit) or the factor is unusable.
    #[allow(clippy::float_cmp)]
    pub fn zoom_at(&mut self, factor: f64, anchor: Option<Point>) -> bool {
        if !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        let old_zoom = self.zoom;
        let new_zoom = self.clamp_zoom(old_zoom * factor);
        if new_zoom == old_zoom {
            return false;
        }
        let anchor_screen = anchor.filter(|p| p.is_finite()).unwrap_or_else(|| self.viewport_center());
        let anchor_world = self.screen_to_world(anchor_screen);
        self.place(anchor_world, anchor_screen, new_zoom)
    }

    /// Set zoom (clamped) and pan so that `world` maps exactly onto `screen`.
    ///
    /// Returns `false` and leaves the camera untouched when the inputs or the
    /// resulting pan are not finite.
    pub fn place(&mut self, world: Point, screen: Point, zoom: f64) -> bool {
        let zoom = self.clamp_zoom(zoom);
        if !(zoom.is_finite() && world.is_finite() && screen.is_finite()) {
            return false;
        }
        self.set_if_finite(zoom, screen.x - world.x * zoom, screen.y - world.y * zoom)
    }

    /// Center `world` in the viewport at `zoom` (clamped). Returns `false` when
    /// the camera could not be moved there.
    pub fn center_on(&mut self, world: Point, zoom: f64) -> bool {
        self.place(world, self.viewport_center(), zoom)
    }

    /// Zoom and pan so `bounds` is centered and fully visible.
    ///
    /// `padding` is a fraction of the content size added on each side before
    /// choosing the zoom; the unpadded box is what gets centered. The chosen
    /// zoom is clamped, so very large scenes may still overflow at `min_zoom`.
    /// Bounds too large to center with a finite pan leave the camera as is.
    pub fn fit_to_bounds(&mut self, bounds: &Aabb, padding: f64) {
        if !bounds.is_finite() {
            return;
        }
        let content_w = bounds.width();
        let content_h = bounds.height();
        let padded_w = content_w + 2.0 * content_w * padding;
        let padded_h = content_h + 2.0 * content_h * padding;
        let scale = (self.viewport_width / padded_w).min(self.viewport_height / padded_h);
        let zoom = self.clamp_zoom(if scale.is_nan() { self.zoom } else { scale });

        let center = bounds.center();
        let view = self.viewport_center();
        self.set_if_finite(zoom, view.x - center.x * zoom, view.y - center.y * zoom);
    }

    fn set_if_finite(&mut self, zoom: f64, pan_x: f64, pan_y: f64) -> bool {
        if !(zoom.is_finite() && pan_x.is_finite() && pan_y.is_finite()) {
            return false;
        }
        self.zoom = zoom;
        self.pan_x = pan_x;
        self.pan_y = pan_y;
        true
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

//! Shared numeric constants for the canvas crate.

use std::f64::consts::TAU;

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest zoom (screen pixels per world unit) the camera allows by default.
pub const MIN_ZOOM: f64 = 0.2;

/// Largest zoom the camera allows by default.
pub const MAX_ZOOM: f64 = 6.0;

/// Zoom multiplier applied per wheel tick.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

/// Zoom multiplier applied by the zoom-in / zoom-out buttons.
pub const BUTTON_ZOOM_STEP: f64 = 1.15;

/// Fraction of content size added on each side when fitting to bounds.
pub const FIT_PADDING: f64 = 0.06;

// ── Search focus ────────────────────────────────────────────────

/// Below this zoom, jumping to a search match raises the zoom.
pub const FOCUS_THRESHOLD_ZOOM: f64 = 0.9;

/// Zoom used when a search match is focused from a too-distant view.
pub const FOCUS_ZOOM: f64 = 1.2;

// ── Rendering ───────────────────────────────────────────────────

/// Labels are drawn only at or above this zoom.
pub const LABEL_MIN_ZOOM: f64 = 0.6;

/// Upper bound for the device pixel ratio.
pub const MAX_DPR: f64 = 3.0;

// ── Geometry ────────────────────────────────────────────────────

/// Rotations with a larger magnitude than one full turn are read as degrees.
pub const RADIANS_LIMIT: f64 = TAU;

/// Half-extent of the scene box used when a layout has no geometry.
pub const EMPTY_SCENE_HALF_EXTENT: f64 = 100.0;

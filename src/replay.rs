//! Scripted input replay: drives the engine from a JSON list of synthetic
//! pointer, wheel, viewport, and search events.
//!
//! A script is an array of objects tagged by `event`:
//!
//! ```json
//! [
//!   { "event": "down", "id": 1, "x": 100, "y": 100 },
//!   { "event": "move", "id": 1, "x": 140, "y": 90 },
//!   { "event": "up", "id": 1 },
//!   { "event": "wheel", "deltaY": -120, "x": 200, "y": 150 },
//!   { "event": "search", "query": "rack a" },
//!   { "event": "next" }
//! ]
//! ```

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use canvas::camera::Camera;
use canvas::engine::{Action, EngineCore};
use canvas::geometry::Point;
use canvas::input::PointerId;
use serde::{Deserialize, Serialize};

/// One synthetic input event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ReplayEvent {
    Down { id: PointerId, x: f64, y: f64 },
    Move { id: PointerId, x: f64, y: f64 },
    /// Pointer lifted or cancelled.
    Up { id: PointerId },
    #[serde(rename_all = "camelCase")]
    Wheel { delta_y: f64, x: f64, y: f64 },
    Pan { dx: f64, dy: f64 },
    /// Zoom about `(x, y)`, or the viewport center when either is missing.
    Zoom {
        factor: f64,
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
    },
    ZoomIn,
    ZoomOut,
    Fit,
    Reset,
    Viewport {
        width: f64,
        height: f64,
        #[serde(default = "default_dpr")]
        dpr: f64,
    },
    Search { query: String },
    Next,
    Layer { name: String, visible: bool },
}

fn default_dpr() -> f64 {
    1.0
}

/// Outcome of a replayed script.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySummary {
    pub events: usize,
    /// Events that asked for a repaint.
    pub renders: usize,
    pub notifications: Vec<String>,
    /// Search cursor after the last event, as "k of n".
    pub search: String,
    pub highlighted: Option<String>,
    pub camera: Camera,
}

/// Parse a replay script.
///
/// # Errors
///
/// Returns the JSON error when the text is not an array of known events.
pub fn parse_script(text: &str) -> Result<Vec<ReplayEvent>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Apply one event to the engine and return the actions it produced.
pub fn apply(core: &mut EngineCore, event: &ReplayEvent) -> Vec<Action> {
    match *event {
        ReplayEvent::Down { id, x, y } => core.on_pointer_down(id, Point::new(x, y)),
        ReplayEvent::Move { id, x, y } => core.on_pointer_move(id, Point::new(x, y)),
        ReplayEvent::Up { id } => core.on_pointer_up(id),
        ReplayEvent::Wheel { delta_y, x, y } => core.on_wheel(delta_y, Point::new(x, y)),
        ReplayEvent::Pan { dx, dy } => core.pan(dx, dy),
        ReplayEvent::Zoom { factor, x, y } => {
            let anchor = x.zip(y).map(|(x, y)| Point::new(x, y));
            core.zoom_by(factor, anchor)
        }
        ReplayEvent::ZoomIn => core.zoom_in(),
        ReplayEvent::ZoomOut => core.zoom_out(),
        ReplayEvent::Fit => core.fit_to_bounds(),
        ReplayEvent::Reset => core.reset_view(),
        ReplayEvent::Viewport { width, height, dpr } => core.set_viewport(width, height, dpr),
        ReplayEvent::Search { ref query } => core.search(query).1,
        ReplayEvent::Next => core.next_match().1,
        ReplayEvent::Layer { ref name, visible } => core.set_layer_visible(name, visible),
    }
}

/// Replay every event in order.
pub fn run(core: &mut EngineCore, events: &[ReplayEvent]) -> ReplaySummary {
    let mut renders = 0;
    let mut notifications = Vec::new();
    for event in events {
        let actions = apply(core, event);
        if actions.contains(&Action::RenderNeeded) {
            renders += 1;
        }
        for action in actions {
            if let Action::Notify(msg) = action {
                tracing::info!(%msg, "notification");
                notifications.push(msg);
            }
        }
    }
    tracing::debug!(events = events.len(), renders, "replay finished");
    ReplaySummary {
        events: events.len(),
        renders,
        notifications,
        search: core.search.status().to_string(),
        highlighted: core.search.highlighted().cloned(),
        camera: core.camera(),
    }
}

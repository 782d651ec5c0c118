//! Input model: the pointer table and the pan/pinch/wheel gesture state machine.
//!
//! The machine is keyed by the number of live pointers:
//!
//! | Live pointers | State | Move behaviour |
//! |---------------|-------|----------------|
//! | 0 | [`InputState::Idle`] | ignored |
//! | 1 | [`InputState::Panning`] | pan by the pointer's delta since its last position |
//! | ≥2 | [`InputState::Pinching`] | zoom by distance ratio, anchored at the session's world midpoint |
//!
//! A [`PinchSession`] opens the instant a second pointer goes down and is
//! discarded as soon as fewer than two remain. Positions are tracked per
//! pointer throughout, so dropping back to one pointer resumes panning from
//! where that pointer actually is. Wheel input is independent of pointer
//! state. Events are applied synchronously in arrival order.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::BTreeMap;

use tracing::debug;

use crate::camera::Camera;
use crate::geometry::Point;

/// Pointer identifier as reported by the host input system.
pub type PointerId = i32;

/// Reference frame of an active two-pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchSession {
    /// The two lowest live pointer ids, in ascending order.
    pub pair: (PointerId, PointerId),
    /// Distance between the pair when the session opened.
    pub initial_distance: f64,
    /// Camera zoom when the session opened.
    pub initial_zoom: f64,
    /// Camera pan when the session opened.
    pub initial_pan_x: f64,
    pub initial_pan_y: f64,
    /// Screen midpoint of the pair when the session opened.
    pub midpoint: Point,
    /// World point that was under `midpoint` when the session opened. It is
    /// kept under the live midpoint for the whole gesture.
    pub anchor_world: Point,
}

impl PinchSession {
    /// Capture the current camera as the reference frame for the pair `(a, b)`.
    #[must_use]
    pub fn open(pair: (PointerId, PointerId), a: Point, b: Point, camera: &Camera) -> Self {
        let midpoint = a.midpoint(b);
        Self {
            pair,
            initial_distance: a.distance(b),
            initial_zoom: camera.zoom,
            initial_pan_x: camera.pan_x,
            initial_pan_y: camera.pan_y,
            midpoint,
            anchor_world: camera.screen_to_world(midpoint),
        }
    }

    /// Live distance ratio. A zero starting distance yields 1 so the zoom holds.
    #[must_use]
    pub fn ratio(&self, current_distance: f64) -> f64 {
        if self.initial_distance > 0.0 {
            let r = current_distance / self.initial_distance;
            if r.is_finite() { r } else { 1.0 }
        } else {
            1.0
        }
    }
}

/// Gesture currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No pointers down.
    #[default]
    Idle,
    /// Exactly one pointer down; its moves pan the camera.
    Panning {
        /// The pointer driving the pan.
        pointer: PointerId,
    },
    /// Two or more pointers down; the lowest two drive a pinch zoom.
    Pinching(PinchSession),
}

/// Zoom factor for one wheel tick: `step` for scrolling up (negative `delta_y`),
/// its reciprocal for scrolling down, and `None` when there is no vertical delta.
#[must_use]
pub fn wheel_factor(delta_y: f64, step: f64) -> Option<f64> {
    if delta_y < 0.0 {
        Some(step)
    } else if delta_y > 0.0 {
        Some(1.0 / step)
    } else {
        None
    }
}

/// Pointer table plus gesture state. Sole owner of pointer tracking.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    pointers: BTreeMap<PointerId, Point>,
    state: InputState,
}

impl GestureTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The gesture currently in progress.
    #[must_use]
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Number of live pointers.
    #[must_use]
    pub fn live_pointers(&self) -> usize {
        self.pointers.len()
    }

    /// Last known position of a live pointer.
    #[must_use]
    pub fn pointer_position(&self, id: PointerId) -> Option<Point> {
        self.pointers.get(&id).copied()
    }

    /// The active pinch session, if any.
    #[must_use]
    pub fn pinch(&self) -> Option<&PinchSession> {
        match &self.state {
            InputState::Pinching(session) => Some(session),
            _ => None,
        }
    }

    /// Register a pointer going down. Never moves the camera.
    pub fn pointer_down(&mut self, id: PointerId, pos: Point, camera: &Camera) {
        if !pos.is_finite() {
            return;
        }
        self.pointers.insert(id, pos);
        self.sync_state(camera);
    }

    /// Apply a pointer move. Returns `true` when the camera changed.
    pub fn pointer_move(&mut self, id: PointerId, pos: Point, camera: &mut Camera) -> bool {
        if !pos.is_finite() {
            return false;
        }
        let Some(last) = self.pointers.insert(id, pos) else {
            // Not a live pointer (hover, or a pointer whose down we never saw).
            self.pointers.remove(&id);
            return false;
        };

        match self.state {
            InputState::Idle => false,
            InputState::Panning { pointer } => pointer == id && camera.pan_by(pos.x - last.x, pos.y - last.y),
            InputState::Pinching(session) => {
                if id != session.pair.0 && id != session.pair.1 {
                    return false;
                }
                self.apply_pinch(&session, camera)
            }
        }
    }

    /// Register a pointer going up or being cancelled. Never moves the camera.
    pub fn pointer_up(&mut self, id: PointerId, camera: &Camera) {
        if self.pointers.remove(&id).is_some() {
            self.sync_state(camera);
        }
    }

    /// Apply one wheel tick anchored at `pos`. Returns `true` when the camera changed.
    pub fn wheel(&mut self, delta_y: f64, pos: Point, step: f64, camera: &mut Camera) -> bool {
        let Some(factor) = wheel_factor(delta_y, step) else {
            return false;
        };
        let changed = camera.zoom_at(factor, Some(pos));
        if changed {
            self.rebase(camera);
        }
        changed
    }

    /// Re-capture an active pinch session after the camera was changed by
    /// something other than the pinch itself, so the next move continues from
    /// the new view instead of snapping back.
    pub fn rebase(&mut self, camera: &Camera) {
        if let InputState::Pinching(session) = self.state
            && let Some((a, b)) = self.pair_positions(session.pair)
        {
            self.state = InputState::Pinching(PinchSession::open(session.pair, a, b, camera));
        }
    }

    /// Forget every pointer and return to idle.
    pub fn reset(&mut self) {
        self.pointers.clear();
        self.state = InputState::Idle;
    }

    fn sync_state(&mut self, camera: &Camera) {
        let mut ids = self.pointers.keys().copied();
        let next = match (ids.next(), ids.next()) {
            (None, _) => InputState::Idle,
            (Some(pointer), None) => InputState::Panning { pointer },
            (Some(first), Some(second)) => match self.state {
                InputState::Pinching(session) if session.pair == (first, second) => self.state,
                _ => {
                    let (a, b) = (self.pointers[&first], self.pointers[&second]);
                    let session = PinchSession::open((first, second), a, b, camera);
                    debug!(pair = ?session.pair, distance = session.initial_distance, "pinch session opened");
                    InputState::Pinching(session)
                }
            },
        };
        if matches!(self.state, InputState::Pinching(_)) && !matches!(next, InputState::Pinching(_)) {
            debug!(live = self.pointers.len(), "pinch session closed");
        }
        self.state = next;
    }

    fn pair_positions(&self, pair: (PointerId, PointerId)) -> Option<(Point, Point)> {
        Some((*self.pointers.get(&pair.0)?, *self.pointers.get(&pair.1)?))
    }

    fn apply_pinch(&self, session: &PinchSession, camera: &mut Camera) -> bool {
        let Some((a, b)) = self.pair_positions(session.pair) else {
            return false;
        };
        let zoom = camera.clamp_zoom(session.initial_zoom * session.ratio(a.distance(b)));
        let before = *camera;
        camera.place(session.anchor_world, a.midpoint(b), zoom) && *camera != before
    }
}

use tracing::{debug, error, info, warn};

use crate::bounds::{empty_scene_bounds, scene_bounds};
use crate::camera::Camera;
use crate::config::ViewerConfig;
use crate::cull::{LayerFilter, query_visible};
use crate::doc::{ObjectId, SceneObject, SceneStore};
use crate::geometry::{Aabb, Point};
use crate::input::{GestureTracker, PointerId};
use crate::layout::{LayoutDocument, LayoutSource, LoadError};
use crate::normalize::normalize_object;
use crate::render::{self, ApproxMeasure, DrawCommand, TextMeasure};
use crate::search::{SearchSession, SearchStatus, SkuTable};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Notification shown after a layout loads.
pub const LAYOUT_LOADED: &str = "Layout loaded";
/// Notification shown when a layout cannot be loaded.
pub const LAYOUT_LOAD_FAILED: &str = "Error loading layout";
/// Notification shown when a search finds nothing.
pub const NO_MATCHES: &str = "No matches";

/// Actions returned from engine operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The view changed; repaint from [`EngineCore::render_plan`].
    RenderNeeded,
    /// Show a short transient message.
    Notify(String),
    /// The search cursor moved; update the "k of n" display.
    SearchStatus(SearchStatus),
}

/// Core viewer state: everything about the loaded floor plan and its view.
///
/// Independent of any drawing surface or event source, so several maps can
/// live side by side and every behaviour can be driven from tests.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub config: ViewerConfig,
    pub camera: Camera,
    pub store: SceneStore,
    pub skus: SkuTable,
    pub layers: LayerFilter,
    pub search: SearchSession,
    gesture: GestureTracker,
    bounds: Aabb,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(ViewerConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with custom zoom limits and steps.
    #[must_use]
    pub fn with_config(config: ViewerConfig) -> Self {
        Self {
            camera: Camera::from_config(&config),
            config,
            store: SceneStore::new(),
            skus: SkuTable::default(),
            layers: LayerFilter::default(),
            search: SearchSession::new(),
            gesture: GestureTracker::new(),
            bounds: empty_scene_bounds(),
        }
    }

    // --- Loading ---

    /// Parse and load a layout document from JSON text.
    ///
    /// On error nothing changes: the previous scene stays loaded.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the text is not a JSON object.
    pub fn load_scene(&mut self, text: &str) -> Result<Vec<Action>, LoadError> {
        let doc = LayoutDocument::parse(text)?;
        Ok(self.load_document(doc))
    }

    /// Replace the scene with a parsed document: normalize and index every
    /// record, recompute bounds, clear the search, and fit the view.
    pub fn load_document(&mut self, doc: LayoutDocument) -> Vec<Action> {
        let skus = SkuTable::new(doc.sku_db);
        let objects: Vec<SceneObject> = doc.objects.iter().map(|raw| normalize_object(raw, &skus)).collect();
        let replaced = self.store.load(objects);
        if replaced > 0 {
            warn!(replaced, "layout contained duplicate object ids; later records won");
        }
        self.skus = skus;
        self.bounds = scene_bounds(self.store.iter(), doc.bounds);
        self.search.clear();

        self.camera.pan_x = 0.0;
        self.camera.pan_y = 0.0;
        self.camera.zoom = self.camera.clamp_zoom(1.0);
        self.camera.fit_to_bounds(&self.bounds, self.config.fit_padding);
        self.gesture.rebase(&self.camera);

        info!(
            objects = self.store.len(),
            skus = self.skus.len(),
            explicit_bounds = doc.bounds.is_some(),
            zoom = self.camera.zoom,
            "layout loaded"
        );
        vec![
            Action::RenderNeeded,
            Action::SearchStatus(self.search.status()),
            Action::Notify(LAYOUT_LOADED.to_owned()),
        ]
    }

    /// Fetch and load a layout from `source`. Failures are logged and
    /// reported as a single notification; the previous scene stays intact.
    pub fn load_from(&mut self, source: &dyn LayoutSource) -> Vec<Action> {
        match source.fetch().and_then(|text| self.load_scene(&text)) {
            Ok(actions) => actions,
            Err(e) => {
                error!(source = %source.describe(), error = %e, "layout load failed");
                vec![Action::Notify(LAYOUT_LOAD_FAILED.to_owned())]
            }
        }
    }

    // --- Viewport ---

    /// Update viewport size (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width: f64, height: f64, dpr: f64) -> Vec<Action> {
        self.camera.set_viewport(width, height, dpr, self.config.max_dpr);
        vec![Action::RenderNeeded]
    }

    /// Translate the view by a screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        if !self.camera.pan_by(dx, dy) {
            return Vec::new();
        }
        self.gesture.rebase(&self.camera);
        vec![Action::RenderNeeded]
    }

    /// Zoom by `factor` keeping the world point under `anchor` fixed
    /// (viewport center when `None`). At a zoom limit this does nothing.
    pub fn zoom_by(&mut self, factor: f64, anchor: Option<Point>) -> Vec<Action> {
        if !self.camera.zoom_at(factor, anchor) {
            return Vec::new();
        }
        self.gesture.rebase(&self.camera);
        vec![Action::RenderNeeded]
    }

    /// One zoom-in button step about the viewport center.
    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom_by(self.config.button_step, None)
    }

    /// One zoom-out button step about the viewport center.
    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.zoom_by(1.0 / self.config.button_step, None)
    }

    /// Fit the scene bounds into the viewport with the configured padding.
    pub fn fit_to_bounds(&mut self) -> Vec<Action> {
        self.camera.fit_to_bounds(&self.bounds, self.config.fit_padding);
        self.gesture.rebase(&self.camera);
        vec![Action::RenderNeeded]
    }

    /// Return to the initial fitted view.
    pub fn reset_view(&mut self) -> Vec<Action> {
        self.fit_to_bounds()
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, id: PointerId, screen_pt: Point) -> Vec<Action> {
        self.gesture.pointer_down(id, screen_pt, &self.camera);
        Vec::new()
    }

    pub fn on_pointer_move(&mut self, id: PointerId, screen_pt: Point) -> Vec<Action> {
        if self.gesture.pointer_move(id, screen_pt, &mut self.camera) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Pointer lifted or cancelled.
    pub fn on_pointer_up(&mut self, id: PointerId) -> Vec<Action> {
        self.gesture.pointer_up(id, &self.camera);
        Vec::new()
    }

    pub fn on_wheel(&mut self, delta_y: f64, screen_pt: Point) -> Vec<Action> {
        if self.gesture.wheel(delta_y, screen_pt, self.config.wheel_step, &mut self.camera) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Search ---

    /// Run a query over visible objects and jump to the first match.
    ///
    /// An empty query clears the search. Returns the match count together
    /// with the actions for the host.
    pub fn search(&mut self, query: &str) -> (usize, Vec<Action>) {
        let layers = &self.layers;
        let count = self.search.run(query, self.store.iter().filter(|obj| layers.shows(obj)));
        debug!(query, count, "search");

        let mut actions = Vec::new();
        if count == 0 {
            if !query.trim().is_empty() {
                actions.push(Action::Notify(NO_MATCHES.to_owned()));
            }
        } else {
            self.focus_current();
        }
        actions.push(Action::RenderNeeded);
        actions.push(Action::SearchStatus(self.search.status()));
        (count, actions)
    }

    /// Advance to the next match (wrapping) and center on it.
    pub fn next_match(&mut self) -> (Option<ObjectId>, Vec<Action>) {
        let Some(id) = self.search.advance().cloned() else {
            return (None, Vec::new());
        };
        self.focus_current();
        (Some(id), vec![Action::RenderNeeded, Action::SearchStatus(self.search.status())])
    }

    /// Center the view on the current match, raising the zoom to a readable
    /// level when the view is too far out.
    fn focus_current(&mut self) {
        let Some(center) = self.search.current().and_then(|id| self.store.get(id)).map(|obj| obj.center) else {
            return;
        };
        let zoom = if self.camera.zoom < self.config.focus_threshold_zoom {
            self.config.focus_zoom
        } else {
            self.camera.zoom
        };
        if self.camera.center_on(center, zoom) {
            self.gesture.rebase(&self.camera);
        }
    }

    // --- Layers ---

    /// Show or hide a layer. Hidden objects are skipped by culling, search,
    /// and the render plan. The current search is not re-run.
    pub fn set_layer_visible(&mut self, layer: &str, visible: bool) -> Vec<Action> {
        if self.layers.set_visible(layer, visible) {
            debug!(layer, visible, "layer visibility changed");
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        self.camera.world_to_screen(world)
    }

    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.camera.screen_to_world(screen)
    }

    /// Ids of visible objects whose AABB intersects the world-space `region`.
    #[must_use]
    pub fn query_visible(&self, region: Aabb) -> Vec<ObjectId> {
        query_visible(&self.store, &self.layers, region)
    }

    /// Ids of objects currently on screen.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<ObjectId> {
        self.query_visible(self.camera.visible_world_rect())
    }

    /// Draw list for the current frame using estimated text metrics.
    #[must_use]
    pub fn render_plan(&self) -> Vec<DrawCommand> {
        self.render_plan_with(&ApproxMeasure::default())
    }

    /// Draw list for the current frame using the host's text metrics.
    #[must_use]
    pub fn render_plan_with(&self, measure: &impl TextMeasure) -> Vec<DrawCommand> {
        render::plan(
            &self.store,
            &self.layers,
            &self.camera,
            self.search.highlighted().map(String::as_str),
            self.config.label_min_zoom,
            measure,
        )
    }

    /// The current scene bounds.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// The gesture tracker, for inspecting pointer state.
    #[must_use]
    pub fn gesture(&self) -> &GestureTracker {
        &self.gesture
    }

    /// Look up an object by id.
    #[must_use]
    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.store.get(id)
    }
}

//! Visible-region queries over the scene.

#[cfg(test)]
#[path = "cull_test.rs"]
mod cull_test;

use std::collections::HashSet;

use crate::doc::{ObjectId, SceneObject, SceneStore};
use crate::geometry::Aabb;

/// Layer visibility filter. Objects without a layer are always visible.
#[derive(Debug, Clone, Default)]
pub struct LayerFilter {
    hidden: HashSet<String>,
}

impl LayerFilter {
    /// Show or hide every object on `layer`. Returns `true` when visibility changed.
    pub fn set_visible(&mut self, layer: &str, visible: bool) -> bool {
        if visible { self.hidden.remove(layer) } else { self.hidden.insert(layer.to_owned()) }
    }

    #[must_use]
    pub fn is_layer_visible(&self, layer: &str) -> bool {
        !self.hidden.contains(layer)
    }

    #[must_use]
    pub fn shows(&self, obj: &SceneObject) -> bool {
        obj.layer.as_deref().is_none_or(|layer| self.is_layer_visible(layer))
    }
}

/// Visible objects whose AABB intersects `region`, in scene order.
pub fn visible_objects<'a>(
    store: &'a SceneStore,
    filter: &'a LayerFilter,
    region: Aabb,
) -> impl Iterator<Item = &'a SceneObject> + 'a {
    store
        .iter()
        .filter(move |obj| filter.shows(obj) && region.intersects(&obj.aabb))
}

/// Ids of visible objects whose AABB intersects `region`, in scene order.
#[must_use]
pub fn query_visible(store: &SceneStore, filter: &LayerFilter, region: Aabb) -> Vec<ObjectId> {
    visible_objects(store, filter, region)
        .map(|obj| obj.id.clone())
        .collect()
}

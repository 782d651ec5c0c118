//! Scene model: normalized map objects and the in-memory store.
//!
//! This module defines what is on the map after normalization
//! ([`SceneObject`], [`Shape`], [`SkuRef`]) and the runtime store that owns all
//! live objects ([`SceneStore`]). Objects arrive here from
//! [`crate::normalize`]; every other component reads them through the store,
//! which preserves document order and answers lookups by id.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::Serialize;

use crate::geometry::{Aabb, Point};

/// Unique identifier for a map object, as given by the layout document.
pub type ObjectId = String;

/// Type tag used by the layout document for wall segments.
pub const WALL_KIND: &str = "wall";

/// Canonical geometry of a map object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Shape {
    /// Straight wall segment between two endpoints.
    Wall { a: Point, b: Point },
    /// Rectangle given by its unrotated top-left corner and size. The
    /// object's `rotation` turns it about its center.
    Rect { x: f64, y: f64, w: f64, h: f64 },
}

/// A SKU code assigned to an object, with its quantity when the layout gave one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkuRef {
    pub code: String,
    pub qty: Option<f64>,
}

/// A normalized map object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    /// Unique identifier for this object.
    pub id: ObjectId,
    /// Type tag from the layout (`wall`, `rack`, `zone`, `pallet`, ...).
    pub kind: String,
    /// Layer name used for visibility filtering.
    pub layer: Option<String>,
    /// Canonical geometry.
    pub shape: Shape,
    /// World-space center (segment midpoint for walls).
    pub center: Point,
    /// Rotation in radians about `center`. Always 0 for walls.
    pub rotation: f64,
    /// Axis-aligned box containing the rotated shape.
    pub aabb: Aabb,
    /// Explicit color from the layout, if any.
    pub color: Option<String>,
    /// Label text, if any.
    pub label: Option<String>,
    /// Label font size in world units, if given.
    pub label_size: Option<f64>,
    /// Assigned SKU codes in first-seen order, without duplicates.
    pub skus: Vec<SkuRef>,
    /// Normalized searchable text (label, SKU codes, SKU metadata).
    pub search_text: String,
}

impl SceneObject {
    /// Whether this object is a wall segment.
    #[must_use]
    pub fn is_wall(&self) -> bool {
        matches!(self.shape, Shape::Wall { .. })
    }
}

/// Ordered store of map objects with lookup by id.
///
/// Iteration follows document order. Ids are unique: inserting an object
/// whose id is already present replaces the earlier object in place.
#[derive(Debug, Clone, Default)]
pub struct SceneStore {
    objects: Vec<SceneObject>,
    index: HashMap<ObjectId, usize>,
}

impl SceneStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object, or replace the object with the same id in place.
    ///
    /// Returns `true` when an existing object was replaced.
    pub fn insert(&mut self, obj: SceneObject) -> bool {
        if let Some(&slot) = self.index.get(&obj.id) {
            self.objects[slot] = obj;
            return true;
        }
        self.index.insert(obj.id.clone(), self.objects.len());
        self.objects.push(obj);
        false
    }

    /// Return a reference to an object by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.index.get(id).map(|&slot| &self.objects[slot])
    }

    /// Whether an object with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Replace all objects with a fresh set. Returns how many records were
    /// folded into an earlier object with the same id.
    pub fn load(&mut self, objects: Vec<SceneObject>) -> usize {
        self.clear();
        objects.into_iter().map(|obj| usize::from(self.insert(obj))).sum()
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.index.clear();
    }

    /// Iterate objects in document order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Number of objects currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the store contains no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

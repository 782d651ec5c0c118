//! Scene bounds: the single box the camera fits to on load.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use crate::consts::EMPTY_SCENE_HALF_EXTENT;
use crate::doc::SceneObject;
use crate::geometry::Aabb;

/// Box used when a scene has no usable geometry.
#[must_use]
pub fn empty_scene_bounds() -> Aabb {
    let e = EMPTY_SCENE_HALF_EXTENT;
    Aabb::new(-e, -e, e, e)
}

/// Compute the scene bounds.
///
/// A finite `explicit` override wins outright. Otherwise the result is the
/// union of every object's AABB (non-finite boxes are skipped), falling back
/// to [`empty_scene_bounds`] when nothing contributes.
#[must_use]
pub fn scene_bounds<'a>(objects: impl IntoIterator<Item = &'a SceneObject>, explicit: Option<Aabb>) -> Aabb {
    if let Some(b) = explicit.filter(Aabb::is_finite) {
        return b;
    }
    objects
        .into_iter()
        .map(|obj| obj.aabb)
        .filter(Aabb::is_finite)
        .reduce(Aabb::union)
        .unwrap_or_else(empty_scene_bounds)
}

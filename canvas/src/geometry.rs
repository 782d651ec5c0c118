//! Points, axis-aligned bounding boxes, and rotation helpers.
//!
//! Everything here is world-space agnostic: the same types carry world
//! coordinates (scene units) and screen coordinates (CSS pixels). Callers
//! decide which space a value lives in.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::Serialize;

use crate::consts::RADIANS_LIMIT;

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new(self.x * 0.5 + other.x * 0.5, self.y * 0.5 + other.y * 0.5)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned bounding box. `min_*` never exceeds `max_*` for boxes built by
/// this module; explicit layout overrides are taken as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Aabb {
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Smallest box containing both points.
    #[must_use]
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Smallest box containing every point in `points`, seeded with `first`.
    #[must_use]
    pub fn enclosing(first: Point, points: &[Point]) -> Self {
        points
            .iter()
            .fold(Self::from_points(first, first), |acc, p| acc.include(*p))
    }

    /// Grow the box to contain `p`.
    #[must_use]
    pub fn include(self, p: Point) -> Self {
        Self {
            min_x: self.min_x.min(p.x),
            min_y: self.min_y.min(p.y),
            max_x: self.max_x.max(p.x),
            max_y: self.max_y.max(p.y),
        }
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(self, other: Aabb) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center point. Halves are summed so boxes spanning most of the `f64`
    /// range still have a finite center.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.min_x * 0.5 + self.max_x * 0.5, self.min_y * 0.5 + self.max_y * 0.5)
    }

    /// Whether the boxes overlap. Touching edges count as overlapping.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    /// Whether `p` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite() && self.min_y.is_finite() && self.max_x.is_finite() && self.max_y.is_finite()
    }
}

/// Rotate `p` about `center` by `angle` radians (clockwise on a y-down screen).
#[must_use]
pub fn rotate_about(p: Point, center: Point, angle: f64) -> Point {
    let (s, c) = angle.sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point::new(center.x + dx * c - dy * s, center.y + dx * s + dy * c)
}

/// The four corners of an unrotated rectangle, clockwise from the top-left.
#[must_use]
pub fn rect_corners(x: f64, y: f64, w: f64, h: f64) -> [Point; 4] {
    [
        Point::new(x, y),
        Point::new(x + w, y),
        Point::new(x + w, y + h),
        Point::new(x, y + h),
    ]
}

/// AABB of the rectangle `(x, y, w, h)` rotated by `rotation` radians about its center.
#[must_use]
pub fn rotated_rect_aabb(x: f64, y: f64, w: f64, h: f64, rotation: f64) -> Aabb {
    let center = Point::new(x + w * 0.5, y + h * 0.5);
    let [first, rest @ ..] = rect_corners(x, y, w, h).map(|p| rotate_about(p, center, rotation));
    Aabb::enclosing(first, &rest)
}

/// Resolve the degrees-versus-radians ambiguity of layout rotations.
///
/// A magnitude above one full turn cannot be a sensible radian value, so it is
/// reinterpreted as degrees. Anything at or below a full turn is radians.
#[must_use]
pub fn normalize_rotation(raw: f64) -> f64 {
    if raw.abs() > RADIANS_LIMIT { raw.to_radians() } else { raw }
}

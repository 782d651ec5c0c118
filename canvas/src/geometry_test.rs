#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn contains_with_slop(b: &Aabb, p: Point) -> bool {
    p.x >= b.min_x - EPSILON && p.x <= b.max_x + EPSILON && p.y >= b.min_y - EPSILON && p.y <= b.max_y + EPSILON
}

// =============================================================
// Point
// =============================================================

#[test]
fn point_midpoint() {
    assert_eq!(pt(0.0, 0.0).midpoint(pt(10.0, 4.0)), pt(5.0, 2.0));
}

#[test]
fn point_distance() {
    assert!(approx_eq(pt(0.0, 0.0).distance(pt(3.0, 4.0)), 5.0));
    assert_eq!(pt(2.0, 2.0).distance(pt(2.0, 2.0)), 0.0);
}

#[test]
fn point_is_finite() {
    assert!(pt(1.0, 2.0).is_finite());
    assert!(!pt(f64::NAN, 2.0).is_finite());
    assert!(!pt(1.0, f64::INFINITY).is_finite());
}

// =============================================================
// Aabb
// =============================================================

#[test]
fn aabb_from_points_orders_coordinates() {
    let b = Aabb::from_points(pt(10.0, -2.0), pt(-3.0, 7.0));
    assert_eq!(b, Aabb::new(-3.0, -2.0, 10.0, 7.0));
}

#[test]
fn aabb_union_covers_both() {
    let a = Aabb::new(0.0, 0.0, 1.0, 1.0);
    let b = Aabb::new(-5.0, 0.5, 0.5, 9.0);
    assert_eq!(a.union(b), Aabb::new(-5.0, 0.0, 1.0, 9.0));
}

#[test]
fn aabb_dimensions_and_center() {
    let b = Aabb::new(2.0, 4.0, 12.0, 8.0);
    assert_eq!(b.width(), 10.0);
    assert_eq!(b.height(), 4.0);
    assert_eq!(b.center(), pt(7.0, 6.0));
}

#[test]
fn center_and_midpoint_stay_finite_near_float_limits() {
    let huge = Aabb::new(f64::MAX, -f64::MAX, f64::MAX, f64::MAX);
    assert_eq!(huge.center(), pt(f64::MAX, 0.0));
    assert_eq!(pt(1e308, 1e308).midpoint(pt(1e308, -1e308)), pt(1e308, 0.0));
}

#[test]
fn aabb_intersects_overlapping_and_touching() {
    let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.intersects(&Aabb::new(5.0, 5.0, 15.0, 15.0)));
    assert!(a.intersects(&Aabb::new(10.0, 0.0, 20.0, 10.0)));
    assert!(a.intersects(&Aabb::new(2.0, 2.0, 3.0, 3.0)));
}

#[test]
fn aabb_intersects_rejects_disjoint() {
    let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
    assert!(!a.intersects(&Aabb::new(11.0, 0.0, 20.0, 10.0)));
    assert!(!a.intersects(&Aabb::new(0.0, -20.0, 10.0, -0.5)));
}

#[test]
fn aabb_contains_boundary() {
    let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.contains(pt(0.0, 10.0)));
    assert!(!a.contains(pt(10.5, 5.0)));
}

#[test]
fn aabb_is_finite() {
    assert!(Aabb::new(0.0, 0.0, 1.0, 1.0).is_finite());
    assert!(!Aabb::new(f64::NEG_INFINITY, 0.0, 1.0, 1.0).is_finite());
}

// =============================================================
// rotate_about
// =============================================================

#[test]
fn rotate_about_quarter_turn() {
    let p = rotate_about(pt(1.0, 0.0), pt(0.0, 0.0), FRAC_PI_2);
    assert!(approx_eq(p.x, 0.0));
    assert!(approx_eq(p.y, 1.0));
}

#[test]
fn rotate_about_center_is_fixed() {
    let c = pt(4.0, -3.0);
    let p = rotate_about(c, c, 1.234);
    assert!(approx_eq(p.x, c.x));
    assert!(approx_eq(p.y, c.y));
}

// =============================================================
// rotated_rect_aabb
// =============================================================

#[test]
fn rect_aabb_unrotated_matches_rect() {
    let b = rotated_rect_aabb(1.0, 2.0, 10.0, 4.0, 0.0);
    assert_eq!(b, Aabb::new(1.0, 2.0, 11.0, 6.0));
}

#[test]
fn rect_aabb_quarter_turn_swaps_extent() {
    let b = rotated_rect_aabb(0.0, 0.0, 10.0, 4.0, FRAC_PI_2);
    assert!(approx_eq(b.width(), 4.0));
    assert!(approx_eq(b.height(), 10.0));
    assert!(approx_eq(b.center().x, 5.0));
    assert!(approx_eq(b.center().y, 2.0));
}

#[test]
fn rect_aabb_square_at_45_degrees() {
    let b = rotated_rect_aabb(0.0, 0.0, 2.0, 2.0, FRAC_PI_4);
    let half_diag = 2.0_f64.sqrt();
    assert!(approx_eq(b.min_x, 1.0 - half_diag));
    assert!(approx_eq(b.max_x, 1.0 + half_diag));
    assert!(approx_eq(b.min_y, 1.0 - half_diag));
    assert!(approx_eq(b.max_y, 1.0 + half_diag));
}

#[test]
fn rect_aabb_contains_every_rotated_corner() {
    let (x, y, w, h) = (3.0, -7.0, 12.0, 5.0);
    let center = pt(x + w / 2.0, y + h / 2.0);
    let mut theta = -TAU + 0.05;
    while theta < TAU {
        let b = rotated_rect_aabb(x, y, w, h, theta);
        let corners = rect_corners(x, y, w, h).map(|p| rotate_about(p, center, theta));
        for c in corners {
            assert!(contains_with_slop(&b, c), "corner {c:?} outside {b:?} at {theta}");
        }
        // Minimal: every edge touches at least one corner.
        assert!(corners.iter().any(|c| approx_eq(c.x, b.min_x)));
        assert!(corners.iter().any(|c| approx_eq(c.x, b.max_x)));
        assert!(corners.iter().any(|c| approx_eq(c.y, b.min_y)));
        assert!(corners.iter().any(|c| approx_eq(c.y, b.max_y)));
        theta += 0.37;
    }
}

#[test]
fn rect_aabb_zero_width_collapses_to_line() {
    let b = rotated_rect_aabb(5.0, 5.0, 0.0, 10.0, 0.0);
    assert_eq!(b.width(), 0.0);
    assert_eq!(b.height(), 10.0);
}

#[test]
fn rect_aabb_zero_size_is_point_never_inverted() {
    for theta in [0.0, 0.5, PI, -2.0, 6.0] {
        let b = rotated_rect_aabb(2.0, 3.0, 0.0, 0.0, theta);
        assert!(b.min_x <= b.max_x);
        assert!(b.min_y <= b.max_y);
        assert!(approx_eq(b.min_x, 2.0));
        assert!(approx_eq(b.max_y, 3.0));
    }
}

#[test]
fn rect_aabb_degenerate_rotated_line_is_not_inverted() {
    let b = rotated_rect_aabb(0.0, 0.0, 10.0, 0.0, FRAC_PI_4);
    assert!(b.min_x <= b.max_x);
    assert!(b.min_y <= b.max_y);
    assert!(approx_eq(b.width(), b.height()));
}

// =============================================================
// normalize_rotation
// =============================================================

#[test]
fn rotation_within_full_turn_is_radians() {
    assert_eq!(normalize_rotation(1.5), 1.5);
    assert_eq!(normalize_rotation(-6.0), -6.0);
    assert_eq!(normalize_rotation(TAU), TAU);
}

#[test]
fn rotation_above_full_turn_is_degrees() {
    assert!(approx_eq(normalize_rotation(90.0), FRAC_PI_2));
    assert!(approx_eq(normalize_rotation(-180.0), -PI));
    assert!(approx_eq(normalize_rotation(45.0), FRAC_PI_4));
}

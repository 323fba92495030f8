//! Segment-triangle intersection
//!
//! Möller-Trumbore ("Fast, Minimum Storage Ray/Triangle Intersection") run on
//! a finite segment. Both windings are accepted; visibility tests rely on
//! back faces blocking as well.

use crate::foundation::math::{constants::EPSILON, Vec3};
use super::primitives::Triangle;

/// Intersection of a segment with a triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayTriangleHit {
    /// Parametric position along the segment, in `(0, 1]`
    pub t: f32,
    /// Barycentric weight of the second vertex
    pub u: f32,
    /// Barycentric weight of the third vertex
    pub v: f32,
}

/// Intersect the segment `start -> end` with a triangle.
///
/// Returns `None` when the segment is parallel to the triangle plane, misses
/// the triangle, or only reaches it at or behind `start` or past `end`.
pub fn ray_triangle(start: &Vec3, end: &Vec3, triangle: &Triangle) -> Option<RayTriangleHit> {
    let dir = end - start;
    let edge1 = triangle.v1 - triangle.v0;
    let edge2 = triangle.v2 - triangle.v0;

    let h = dir.cross(&edge2);
    let det = edge1.dot(&h);

    // Parallel to the plane
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = start - triangle.v0;
    let u = inv_det * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = inv_det * dir.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = inv_det * edge2.dot(&q);
    if t <= EPSILON || t > 1.0 {
        return None;
    }

    Some(RayTriangleHit { t, u, v })
}

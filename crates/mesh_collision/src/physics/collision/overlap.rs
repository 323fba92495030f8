//! Bounding-volume overlap tests
//!
//! Cheap conservative tests used to prune tree nodes before the exact
//! triangle predicates run.

use super::aabb::Aabb;
use super::primitives::{RayBBox, Triangle};
use crate::foundation::math::Vec3;

/// Returns true unless some axis interval of `a` and `b` is disjoint
#[inline]
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    !(a.max.x < b.min.x || a.min.x > b.max.x ||
      a.max.y < b.min.y || a.min.y > b.max.y ||
      a.max.z < b.min.z || a.min.z > b.max.z)
}

/// Sphere against box using the closest point on the box
#[inline]
pub fn sphere_aabb_overlap(center: &Vec3, radius: f32, aabb: &Aabb) -> bool {
    let outside = ((center - aabb.center).abs() - aabb.extents).sup(&Vec3::zeros());
    outside.magnitude_squared() <= radius * radius
}

/// Finite segment against box, separating-axis form
///
/// Tests the three box face axes, then the three cross products of the
/// segment direction with the box axes.
pub fn ray_aabb_overlap(ray: &RayBBox, aabb: &Aabb) -> bool {
    let d = ray.c - aabb.center;
    let h = &aabb.extents;
    let w = &ray.w;
    let v = &ray.v;

    if d.x.abs() > v.x + h.x || d.y.abs() > v.y + h.y || d.z.abs() > v.z + h.z {
        return false;
    }

    if (d.y * w.z - d.z * w.y).abs() > h.y * v.z + h.z * v.y {
        return false;
    }
    if (d.z * w.x - d.x * w.z).abs() > h.x * v.z + h.z * v.x {
        return false;
    }
    if (d.x * w.y - d.y * w.x).abs() > h.x * v.y + h.y * v.x {
        return false;
    }

    true
}

/// Exact triangle-triangle overlap.
///
/// Not implemented: always reports no overlap, so mesh-vs-mesh queries
/// currently never hit even though the dual-tree descent runs in full.
pub fn triangle_triangle_overlap(_a: &Triangle, _b: &Triangle) -> bool {
    false
}

/// Bounding-volume vs triangle overlap.
///
/// Not implemented: always reports no overlap.
pub fn bv_triangle_overlap(_aabb: &Aabb, _triangle: &Triangle) -> bool {
    false
}

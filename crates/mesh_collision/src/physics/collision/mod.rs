//! Collision primitives and intersection predicates
//!
//! All predicates are total: a miss is `false`, `None`, or a time of
//! `1.0`, never an error.
//!
//! # Module Organization
//!
//! - [`aabb`] - Axis-aligned bounding box with min/max and center/extents forms
//! - [`primitives`] - Spheres, ray segments, triangles and hit records
//! - [`overlap`] - Box-level tests (box/box, sphere/box, segment/box)
//! - [`ray_triangle`] - Möller-Trumbore on a finite segment
//! - [`sphere_triangle`] - Static sphere overlap and sphere sweep

pub mod aabb;
pub mod primitives;
pub mod overlap;
pub mod ray_triangle;
pub mod sphere_triangle;

// Re-export commonly used types
pub use aabb::Aabb;
pub use primitives::{RayBBox, RaySegment, SphereShape, TraceHit, Triangle};
pub use overlap::{
    aabb_overlap,
    bv_triangle_overlap,
    ray_aabb_overlap,
    sphere_aabb_overlap,
    triangle_triangle_overlap,
};
pub use ray_triangle::{ray_triangle, RayTriangleHit};
pub use sphere_triangle::{sphere_triangle_overlap, sphere_triangle_sweep};

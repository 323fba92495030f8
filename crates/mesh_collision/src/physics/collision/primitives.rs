//! Primitive collision shapes
//!
//! Spheres, finite ray segments, triangles and the hit record returned by
//! the tree queries.

use crate::foundation::math::{utils, Vec3};
use super::aabb::Aabb;

/// A sphere used for overlap and sweep queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereShape {
    /// The center position of the sphere
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl SphereShape {
    /// Creates a new sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Bounding box of the sphere
    pub fn aabb(&self) -> Aabb {
        Aabb::from_sphere(self.center, self.radius)
    }
}

/// A finite ray from `start` to `end`
///
/// Hit fractions are parametric along this segment: `0.0` is `start`,
/// `1.0` is `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySegment {
    /// Segment start point
    pub start: Vec3,
    /// Segment end point
    pub end: Vec3,
}

impl RaySegment {
    /// Creates a new segment
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// Unnormalized direction, `end - start`
    pub fn delta(&self) -> Vec3 {
        self.end - self.start
    }

    /// Length of the segment
    pub fn length(&self) -> f32 {
        self.delta().magnitude()
    }

    /// Get the point at parametric fraction `t`
    pub fn point_at(&self, t: f32) -> Vec3 {
        utils::lerp(&self.start, &self.end, t)
    }

    /// Precomputed form for box tests
    pub fn bbox(&self) -> RayBBox {
        RayBBox::new(self.start, self.end)
    }
}

/// Segment in midpoint / half-delta form for separating-axis box tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayBBox {
    /// Segment midpoint
    pub c: Vec3,
    /// Half of the segment delta
    pub w: Vec3,
    /// `abs(w)`
    pub v: Vec3,
}

impl RayBBox {
    /// Build from segment end points
    pub fn new(start: Vec3, end: Vec3) -> Self {
        let w = (end - start) * 0.5;
        Self {
            c: (start + end) * 0.5,
            w,
            v: w.abs(),
        }
    }
}

/// Result of a ray or sweep query
///
/// `fraction == 1.0` means nothing was hit. For ray hits `b` and `c` are the
/// barycentric weights of the triangle's second and third vertex; sweeps
/// leave them at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHit {
    /// Parametric time of the hit in `[0, 1]`
    pub fraction: f32,
    /// Index of the triangle that was hit
    pub triangle: usize,
    /// Barycentric weight of the second vertex
    pub b: f32,
    /// Barycentric weight of the third vertex
    pub c: f32,
}

impl TraceHit {
    /// A miss
    pub const MISS: TraceHit = TraceHit {
        fraction: 1.0,
        triangle: 0,
        b: 0.0,
        c: 0.0,
    };

    /// Whether something was hit
    pub fn is_hit(&self) -> bool {
        self.fraction < 1.0
    }
}

impl Default for TraceHit {
    fn default() -> Self {
        Self::MISS
    }
}

/// A triangle for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Unnormalized normal (right-hand rule); its length is twice the area
    pub fn scaled_normal(&self) -> Vec3 {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Unit normal (right-hand rule), or `None` for a degenerate triangle
    pub fn normal(&self) -> Option<Vec3> {
        self.scaled_normal().try_normalize(f32::EPSILON)
    }

    /// Calculates the centroid (center point) of the triangle
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Exact bounds of the three vertices
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.v0.inf(&self.v1).inf(&self.v2), self.v0.sup(&self.v1).sup(&self.v2))
    }

    /// Point from barycentric weights of the second and third vertex
    pub fn point_from_barycentric(&self, b: f32, c: f32) -> Vec3 {
        self.v0 * (1.0 - b - c) + self.v1 * b + self.v2 * c
    }
}

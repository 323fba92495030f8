//! Axis-aligned bounding box
//!
//! Stores both the min/max corners and the center/extents form so the
//! overlap tests can use whichever is cheaper without recomputing.

use crate::foundation::math::{utils, Vec3};

/// Axis-aligned bounding box
///
/// `extents` is always `(max - min) / 2` and never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
    /// Midpoint of the box
    pub center: Vec3,
    /// Half-size of the box along each axis
    pub extents: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    ///
    /// `min` must not exceed `max` on any axis; reversed corners are a caller
    /// bug and are not corrected.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(
            min.iter().zip(max.iter()).all(|(lo, hi)| lo <= hi),
            "Aabb corners out of order: min {min:?}, max {max:?}"
        );
        Self {
            min,
            max,
            center: (min + max) * 0.5,
            extents: (max - min) * 0.5,
        }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        let extents = extents.abs();
        Self {
            min: center - extents,
            max: center + extents,
            center,
            extents,
        }
    }

    /// Box around a sphere
    pub fn from_sphere(center: Vec3, radius: f32) -> Self {
        Self::from_center_extents(center, Vec3::repeat(radius))
    }

    /// Smallest box enclosing both boxes
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(
            utils::min_components(&self.min, &other.min),
            utils::max_components(&self.max, &other.max),
        )
    }

    /// Grow the box by `amount` on every side
    pub fn expanded(&self, amount: f32) -> Aabb {
        Aabb::from_center_extents(self.center, self.extents + Vec3::repeat(amount))
    }

    /// Box-volume metric: product of the extents
    ///
    /// Used to decide which side of a dual-tree descent to split first.
    /// This is proportional to, not equal to, the box volume.
    pub fn volume_metric(&self) -> f32 {
        utils::component_product(&self.extents)
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: &Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this AABB fully contains another AABB
    pub fn contains(&self, other: &Aabb) -> bool {
        self.contains_point(&other.min) && self.contains_point(&other.max)
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &Aabb) -> bool {
        super::overlap::aabb_overlap(self, other)
    }
}

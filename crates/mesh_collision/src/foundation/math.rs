//! Math utilities and types
//!
//! Provides the vector types shared by the collision predicates and the tree.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Math constants
pub mod constants {
    /// Tolerance used by the ray-triangle test for parallel rays and
    /// hits at the segment start
    pub const EPSILON: f32 = 1.0e-6;

    /// Sentinel for "no index" in the flat node array
    pub const INVALID_INDEX: i32 = -1;
}

/// Math utility functions
pub mod utils {
    use super::Vec3;

    /// Component-wise minimum of two vectors
    #[inline]
    pub fn min_components(a: &Vec3, b: &Vec3) -> Vec3 {
        a.inf(b)
    }

    /// Component-wise maximum of two vectors
    #[inline]
    pub fn max_components(a: &Vec3, b: &Vec3) -> Vec3 {
        a.sup(b)
    }

    /// Product of the three components
    #[inline]
    pub fn component_product(v: &Vec3) -> f32 {
        v.x * v.y * v.z
    }

    /// Axis indices ordered by descending component value.
    ///
    /// Ties keep x, y, z order.
    pub fn axes_by_descending(v: &Vec3) -> [usize; 3] {
        let mut axes = [0, 1, 2];
        axes.sort_by(|&a, &b| v[b].total_cmp(&v[a]));
        axes
    }

    /// Linear interpolation between two points
    #[inline]
    pub fn lerp(a: &Vec3, b: &Vec3, t: f32) -> Vec3 {
        a + (b - a) * t
    }
}

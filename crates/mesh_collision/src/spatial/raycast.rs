//! Long ray casts
//!
//! [`MeshTree::first_hit`] prunes with the segment's bounding box, which gets
//! loose for long rays. These helpers cut a long ray into consecutive pieces
//! and stop at the first piece that hits something.

use crate::config::RaySegmentConfig;
use crate::foundation::math::Vec3;
use crate::physics::collision::RaySegment;
use super::tree::MeshTree;

/// Fraction of a piece by which the next piece reaches back, so a surface
/// lying exactly on a piece boundary is still found.
const PIECE_OVERLAP: f32 = 1.0e-3;

/// Hit found by [`first_hit_segmented`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongRayHit {
    /// Parametric position along the whole ray, in `(0, 1]`
    pub fraction: f32,
    /// Distance from the ray start
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Index of the triangle hit
    pub triangle: usize,
    /// Barycentric weight of the second vertex
    pub b: f32,
    /// Barycentric weight of the third vertex
    pub c: f32,
}

/// Piece length for a ray of length `total`
pub fn segment_length(total: f32, config: &RaySegmentConfig) -> f32 {
    let divisor = config.segment_divisor.max(1) as f32;
    (total / divisor).max(config.min_segment_length)
}

/// Nearest hit along `start -> end`, walked piece by piece.
///
/// Returns `None` for a miss or a zero-length ray.
pub fn first_hit_segmented(
    tree: &MeshTree<'_>,
    start: &Vec3,
    end: &Vec3,
    config: &RaySegmentConfig,
) -> Option<LongRayHit> {
    let total = (end - start).magnitude();
    if !(total > 0.0) {
        return None;
    }

    let direction = (end - start) / total;
    let step = segment_length(total, config);
    let overlap = step * PIECE_OVERLAP;

    let mut travelled = 0.0f32;
    while travelled < total {
        let from = (travelled - overlap).max(0.0);
        let to = (travelled + step).min(total);
        let piece = RaySegment::new(start + direction * from, start + direction * to);

        let hit = tree.first_hit(&piece);
        if hit.is_hit() {
            let distance = from + hit.fraction * (to - from);
            return Some(LongRayHit {
                fraction: distance / total,
                distance,
                point: start + direction * distance,
                triangle: hit.triangle,
                b: hit.b,
                c: hit.c,
            });
        }

        travelled = to;
    }

    None
}

//! Physics module for collision detection
//!
//! Provides the bounding volumes and exact geometric predicates that the
//! mesh tree in [`crate::spatial`] is built on.

pub mod collision;

pub use collision::{
    Aabb,
    RayBBox,
    RaySegment,
    SphereShape,
    TraceHit,
    Triangle,
};

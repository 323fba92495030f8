//! # Mesh Collision
//!
//! Bounding volume hierarchy over a static triangle mesh, with the exact
//! geometric predicates needed to answer collision and visibility queries.
//!
//! ## Features
//!
//! - **Borrowed Buffers**: The tree borrows the caller's vertex and index data
//! - **Flat Node Array**: Index-linked nodes with a fixed GPU mirror layout
//! - **Ray Queries**: Any-hit and nearest-hit on finite segments
//! - **Sphere Queries**: Overlap (any or all) and swept time of impact
//! - **Diagnostics**: Min, max, average and balanced tree depth
//!
//! ## Quick Start
//!
//! ```rust
//! use mesh_collision::prelude::*;
//!
//! let vertices = vec![
//!     Vec3::new(0.0, 0.0, 0.0),
//!     Vec3::new(1.0, 0.0, 0.0),
//!     Vec3::new(0.0, 1.0, 0.0),
//! ];
//! let elements = vec![0, 1, 2];
//! let tree = MeshTree::new(&vertices, &elements);
//!
//! let ray = RaySegment::new(Vec3::new(0.2, 0.2, -1.0), Vec3::new(0.2, 0.2, 1.0));
//! let hit = tree.first_hit(&ray);
//! assert!(hit.is_hit());
//! assert!((hit.fraction - 0.5).abs() < 1e-6);
//!
//! let sphere = SphereShape::new(Vec3::new(5.0, 5.0, 0.0), 0.5);
//! assert!(!tree.any_hit(&sphere));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod physics;
pub mod spatial;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config, ConfigError, RaySegmentConfig},
        foundation::math::Vec3,
        physics::collision::{Aabb, RaySegment, SphereShape, TraceHit, Triangle},
        spatial::{
            first_hit_segmented,
            CollisionQuery,
            GpuBvhNode,
            LongRayHit,
            MeshError,
            MeshTree,
            Node,
        },
    };
}

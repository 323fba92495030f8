//! Bounding volume hierarchy over static triangle meshes
//!
//! [`MeshTree`] borrows a vertex and index buffer, builds a binary tree of
//! boxes once, and then answers read-only queries: sphere overlap (any or
//! all), segment any-hit and nearest-hit, sphere sweeps, and mesh vs mesh.
//!
//! # Module Organization
//!
//! - [`node`] - Flat node layout with `-1` sentinels
//! - [`tree`] - The tree type, construction and accessors
//! - [`traversal`] - Query descents and the [`CollisionQuery`] trait
//! - [`gpu`] - Fixed-layout node mirror for storage buffers
//! - [`raycast`] - Piecewise casting of long rays

mod builder;
mod diagnostics;
pub mod gpu;
pub mod node;
pub mod raycast;
pub mod traversal;
pub mod tree;

#[cfg(test)]
mod tests;

pub use gpu::GpuBvhNode;
pub use node::{Node, NodeKind};
pub use raycast::{first_hit_segmented, segment_length, LongRayHit};
pub use traversal::CollisionQuery;
pub use tree::{MeshError, MeshTree};

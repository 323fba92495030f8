//! Top-down tree construction
//!
//! Each level splits its triangles at the mean centroid along the longest
//! axis of their bounds, falling back to the next-longest axes and finally
//! to a plain half split so every call strictly shrinks its input. Nodes
//! are emitted children-first into an append-only array, so the root is
//! always the last node.

use crate::foundation::math::{utils, Vec3};
use crate::physics::collision::{Aabb, Triangle};
use super::node::Node;

/// Builds the flat node array for one mesh
pub(crate) struct TreeBuilder<'a> {
    vertices: &'a [Vec3],
    elements: &'a [u32],
    centroids: Vec<Vec3>,
    /// Partition buffer, `2 * triangle_count` long
    scratch: Vec<u32>,
    nodes: Vec<Node>,
    max_depth: usize,
}

impl<'a> TreeBuilder<'a> {
    /// Prepare a builder; buffers must already be validated
    pub fn new(vertices: &'a [Vec3], elements: &'a [u32], max_depth: usize) -> Self {
        let triangle_count = elements.len() / 3;
        let mut builder = Self {
            vertices,
            elements,
            centroids: Vec::with_capacity(triangle_count),
            scratch: vec![0; 2 * triangle_count],
            nodes: Vec::with_capacity((2 * triangle_count).saturating_sub(1)),
            max_depth,
        };
        builder.centroids = (0..triangle_count)
            .map(|t| builder.triangle(t).centroid())
            .collect();
        builder
    }

    /// Run the build, returning the node array and the root index
    pub fn build(mut self) -> (Vec<Node>, Option<usize>) {
        let triangle_count = self.centroids.len();
        if triangle_count == 0 {
            return (Vec::new(), None);
        }

        let mut order: Vec<u32> = (0..triangle_count as u32).collect();
        let root = self.build_range(&mut order, 0);
        (self.nodes, Some(root))
    }

    fn triangle(&self, index: usize) -> Triangle {
        let base = index * 3;
        Triangle::new(
            self.vertices[self.elements[base] as usize],
            self.vertices[self.elements[base + 1] as usize],
            self.vertices[self.elements[base + 2] as usize],
        )
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn build_range(&mut self, triangles: &mut [u32], depth: usize) -> usize {
        debug_assert!(
            depth <= self.max_depth,
            "tree depth {depth} exceeds the configured bound {}",
            self.max_depth
        );

        if let [only] = *triangles {
            let aabb = self.triangle(only as usize).aabb();
            return self.push(Node::leaf(aabb, only as usize));
        }

        let mut min = Vec3::repeat(f32::MAX);
        let mut max = Vec3::repeat(f32::MIN);
        let mut mean = Vec3::zeros();
        for &t in triangles.iter() {
            let tri = self.triangle(t as usize);
            for v in [tri.v0, tri.v1, tri.v2] {
                min = utils::min_components(&min, &v);
                max = utils::max_components(&max, &v);
            }
            mean += self.centroids[t as usize];
        }
        mean /= triangles.len() as f32;
        let bounds = Aabb::new(min, max);

        let split = match self.partition(triangles, &bounds, &mean) {
            Some(split) => split,
            None => {
                log::trace!(
                    "No axis separates {} centroids; splitting in input order",
                    triangles.len()
                );
                triangles.len() / 2
            }
        };

        let (left_half, right_half) = triangles.split_at_mut(split);
        let left = self.build_range(left_half, depth + 1);
        let right = self.build_range(right_half, depth + 1);
        self.push(Node::internal(bounds, left, right))
    }

    /// Stable partition around the mean centroid, longest axis first.
    ///
    /// Returns the size of the left group, or `None` when every axis leaves
    /// one side empty.
    fn partition(&mut self, triangles: &mut [u32], bounds: &Aabb, mean: &Vec3) -> Option<usize> {
        let count = triangles.len();

        for axis in utils::axes_by_descending(&bounds.extents) {
            let mut plane = Vec3::zeros();
            plane[axis] = 1.0;

            let mut left = 0;
            let mut right = 0;
            for &t in triangles.iter() {
                if (self.centroids[t as usize] - mean).dot(&plane) >= 0.0 {
                    self.scratch[left] = t;
                    left += 1;
                } else {
                    self.scratch[count + right] = t;
                    right += 1;
                }
            }

            if left > 0 && right > 0 {
                triangles[..left].copy_from_slice(&self.scratch[..left]);
                triangles[left..].copy_from_slice(&self.scratch[count..count + right]);
                return Some(left);
            }
        }

        None
    }
}

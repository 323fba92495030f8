//! Bounding volume hierarchy over a borrowed triangle mesh

use crate::config::CollisionConfig;
use crate::foundation::math::{constants::INVALID_INDEX, Vec3};
use crate::physics::collision::{Aabb, Triangle};
use super::builder::TreeBuilder;
use super::node::Node;

/// Mesh construction errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Index buffer length is not a multiple of 3
    #[error("Index buffer length {count} is not a multiple of 3")]
    IndexCountNotTriangular {
        /// Length of the index buffer
        count: usize,
    },

    /// An index points past the end of the vertex buffer
    #[error("Index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending vertex index
        index: u32,
        /// Position of the index inside the index buffer
        position: usize,
        /// Length of the vertex buffer
        vertex_count: usize,
    },

    /// Node indices would not fit the 32-bit node layout
    #[error("Mesh has {count} triangles, more than a 32-bit node index can address")]
    TooManyTriangles {
        /// Number of triangles in the mesh
        count: usize,
    },
}

/// Bounding volume hierarchy over a static triangle mesh
///
/// The tree borrows the caller's vertex and index buffers for its whole
/// lifetime, so they cannot change underneath it. It is built once in the
/// constructor and never mutated afterwards; every query takes `&self`.
#[derive(Debug, Clone)]
pub struct MeshTree<'a> {
    vertices: &'a [Vec3],
    elements: &'a [u32],
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl<'a> MeshTree<'a> {
    /// Build a tree over `elements` (three vertex indices per triangle).
    ///
    /// # Panics
    ///
    /// Panics if the index buffer is not a whole number of triangles or
    /// refers to a vertex that does not exist. Use [`MeshTree::try_new`] to
    /// handle those cases as errors.
    pub fn new(vertices: &'a [Vec3], elements: &'a [u32]) -> Self {
        match Self::try_new(vertices, elements) {
            Ok(tree) => tree,
            Err(err) => panic!("Invalid mesh buffers: {err}"),
        }
    }

    /// Build a tree, validating the buffers first
    pub fn try_new(vertices: &'a [Vec3], elements: &'a [u32]) -> Result<Self, MeshError> {
        Self::with_config(vertices, elements, &CollisionConfig::default())
    }

    /// Build a tree using the depth bound from `config`
    pub fn with_config(
        vertices: &'a [Vec3],
        elements: &'a [u32],
        config: &CollisionConfig,
    ) -> Result<Self, MeshError> {
        validate_buffers(vertices, elements)?;

        if elements.is_empty() {
            log::debug!("Empty index buffer, building an empty mesh tree");
        }

        let (nodes, root) = TreeBuilder::new(vertices, elements, config.max_tree_depth).build();

        let tree = Self { vertices, elements, nodes, root };
        log::debug!(
            "Built mesh tree: {} triangles, {} nodes, root {}",
            tree.triangle_count(),
            tree.nodes.len(),
            tree.root_index()
        );
        Ok(tree)
    }

    /// Bounds of the whole mesh, `None` for an empty tree
    pub fn bbox(&self) -> Option<Aabb> {
        self.root.map(|root| self.nodes[root].aabb)
    }

    /// Flat node array; the root is the last entry
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Root node index
    pub fn root(&self) -> Option<usize> {
        self.root
    }

    /// Root node index in the raw node layout, `-1` when empty
    pub fn root_index(&self) -> i32 {
        self.root.map_or(INVALID_INDEX, |root| root as i32)
    }

    /// Borrowed vertex buffer
    pub fn vertices(&self) -> &'a [Vec3] {
        self.vertices
    }

    /// Borrowed index buffer
    pub fn elements(&self) -> &'a [u32] {
        self.elements
    }

    /// Number of triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        self.elements.len() / 3
    }

    /// True when the mesh has no triangles
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Fetch triangle `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= triangle_count()`.
    pub fn triangle(&self, index: usize) -> Triangle {
        let base = index * 3;
        Triangle::new(
            self.vertices[self.elements[base] as usize],
            self.vertices[self.elements[base + 1] as usize],
            self.vertices[self.elements[base + 2] as usize],
        )
    }
}

fn validate_buffers(vertices: &[Vec3], elements: &[u32]) -> Result<(), MeshError> {
    if elements.len() % 3 != 0 {
        return Err(MeshError::IndexCountNotTriangular { count: elements.len() });
    }

    // A tree over n triangles holds 2n - 1 nodes
    let triangle_count = elements.len() / 3;
    if triangle_count > (i32::MAX as usize) / 2 {
        return Err(MeshError::TooManyTriangles { count: triangle_count });
    }

    if let Some((position, &index)) = elements
        .iter()
        .enumerate()
        .find(|(_, &index)| index as usize >= vertices.len())
    {
        return Err(MeshError::IndexOutOfRange {
            index,
            position,
            vertex_count: vertices.len(),
        });
    }

    Ok(())
}

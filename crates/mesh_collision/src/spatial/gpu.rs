//! GPU mirror of the node array
//!
//! Shaders that walk the tree read one [`GpuBvhNode`] per node, in the same
//! order and with the same child indices as [`MeshTree::nodes`].

use bytemuck::{Pod, Zeroable};

use super::node::Node;
use super::tree::MeshTree;

/// Fixed 36-byte node layout for storage buffers
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuBvhNode {
    /// Box center
    pub center: [f32; 3],
    /// Box half-size
    pub extents: [f32; 3],
    /// Left child, -1 for leaves
    pub left: i32,
    /// Right child, -1 for leaves
    pub right: i32,
    /// Triangle index, -1 for internal nodes
    pub element_index: i32,
}

impl From<&Node> for GpuBvhNode {
    fn from(node: &Node) -> Self {
        Self {
            center: node.aabb.center.into(),
            extents: node.aabb.extents.into(),
            left: node.left,
            right: node.right,
            element_index: node.element_index,
        }
    }
}

impl<'a> MeshTree<'a> {
    /// Node array converted to the GPU layout
    pub fn gpu_nodes(&self) -> Vec<GpuBvhNode> {
        self.nodes().iter().map(GpuBvhNode::from).collect()
    }
}

/// Raw bytes of a node slice, ready for upload
pub fn as_bytes(nodes: &[GpuBvhNode]) -> &[u8] {
    bytemuck::cast_slice(nodes)
}

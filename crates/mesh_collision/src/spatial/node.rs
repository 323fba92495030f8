//! Flat tree node
//!
//! Nodes live in one `Vec` and refer to each other by index. The raw `i32`
//! fields match the layout GPU consumers expect; use [`Node::kind`] to
//! read them safely.

use crate::foundation::math::constants::INVALID_INDEX;
use crate::physics::collision::Aabb;

/// Single node in the flat tree
///
/// A node is a leaf iff `element_index != -1`; leaves keep `left` and
/// `right` at `-1`. Internal nodes have `element_index == -1` and both
/// child indices point into the same node array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Bounds of everything below this node
    pub aabb: Aabb,
    /// Left child index, or -1 for a leaf
    pub left: i32,
    /// Right child index, or -1 for a leaf
    pub right: i32,
    /// Triangle index for a leaf, -1 for an internal node
    pub element_index: i32,
}

/// Decoded node variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Leaf holding one triangle
    Leaf(usize),
    /// Internal node with left and right child indices
    Internal(usize, usize),
}

impl Node {
    /// Leaf for one triangle
    pub fn leaf(aabb: Aabb, element: usize) -> Self {
        Self {
            aabb,
            left: INVALID_INDEX,
            right: INVALID_INDEX,
            element_index: element as i32,
        }
    }

    /// Internal node over two children
    pub fn internal(aabb: Aabb, left: usize, right: usize) -> Self {
        Self {
            aabb,
            left: left as i32,
            right: right as i32,
            element_index: INVALID_INDEX,
        }
    }

    /// Check if this node is a leaf
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.element_index != INVALID_INDEX
    }

    /// Triangle index of a leaf
    #[inline]
    pub fn element(&self) -> Option<usize> {
        self.is_leaf().then_some(self.element_index as usize)
    }

    /// Child indices of an internal node
    #[inline]
    pub fn children(&self) -> Option<(usize, usize)> {
        (!self.is_leaf()).then_some((self.left as usize, self.right as usize))
    }

    /// Decode into a [`NodeKind`]
    #[inline]
    pub fn kind(&self) -> NodeKind {
        if self.is_leaf() {
            NodeKind::Leaf(self.element_index as usize)
        } else {
            NodeKind::Internal(self.left as usize, self.right as usize)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_leaf_and_internal_encoding() {
        let aabb = Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));

        let leaf = Node::leaf(aabb, 7);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.element(), Some(7));
        assert_eq!(leaf.children(), None);
        assert_eq!((leaf.left, leaf.right), (-1, -1));
        assert_eq!(leaf.kind(), NodeKind::Leaf(7));

        let internal = Node::internal(aabb, 0, 1);
        assert!(!internal.is_leaf());
        assert_eq!(internal.element(), None);
        assert_eq!(internal.children(), Some((0, 1)));
        assert_eq!(internal.element_index, -1);
        assert_eq!(internal.kind(), NodeKind::Internal(0, 1));
    }

    #[test]
    fn test_triangle_zero_is_a_leaf() {
        let aabb = Aabb::new(Vec3::zeros(), Vec3::zeros());
        assert!(Node::leaf(aabb, 0).is_leaf());
    }
}

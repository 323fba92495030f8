//! Tree shape statistics
//!
//! Depths count edges from the root, so a single-leaf tree has depth 0.
//! An empty tree reports 0 everywhere. All walks use an explicit stack.

use super::node::NodeKind;
use super::tree::MeshTree;

impl<'a> MeshTree<'a> {
    /// Depth of every leaf, in no particular order
    fn leaf_depths(&self) -> Vec<usize> {
        let mut depths = Vec::with_capacity(self.triangle_count());
        let Some(root) = self.root() else {
            return depths;
        };

        let mut stack = vec![(root, 0usize)];
        while let Some((index, depth)) = stack.pop() {
            match self.nodes()[index].kind() {
                NodeKind::Leaf(_) => depths.push(depth),
                NodeKind::Internal(left, right) => {
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }
        depths
    }

    /// Depth of the shallowest leaf
    pub fn min_depth(&self) -> usize {
        self.leaf_depths().into_iter().min().unwrap_or(0)
    }

    /// Depth of the deepest leaf
    pub fn max_depth(&self) -> usize {
        self.leaf_depths().into_iter().max().unwrap_or(0)
    }

    /// Mean leaf depth
    pub fn average_depth(&self) -> f32 {
        let depths = self.leaf_depths();
        if depths.is_empty() {
            return 0.0;
        }
        depths.iter().sum::<usize>() as f32 / depths.len() as f32
    }

    /// `log2(leaf count)`, the depth of a perfectly balanced tree
    pub fn balanced_depth(&self) -> f32 {
        let leaves = self.nodes().iter().filter(|node| node.is_leaf()).count();
        if leaves == 0 {
            return 0.0;
        }
        (leaves as f32).log2()
    }
}

#[cfg(test)]
mod tests {
    use crate::foundation::math::Vec3;
    use crate::spatial::MeshTree;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_leaf() {
        let vertices = vec![Vec3::zeros(), Vec3::x(), Vec3::y()];
        let elements = vec![0, 1, 2];
        let tree = MeshTree::new(&vertices, &elements);
        assert_eq!(tree.min_depth(), 0);
        assert_eq!(tree.max_depth(), 0);
        assert_relative_eq!(tree.average_depth(), 0.0);
        assert_relative_eq!(tree.balanced_depth(), 0.0);
    }

    #[test]
    fn test_three_triangles() {
        // Centroids along x at 1/3, 10/3, 19/3; mean 10/3 so the split is 2 | 1
        let mut vertices = Vec::new();
        let mut elements = Vec::new();
        for i in 0..3u32 {
            let x = i as f32 * 3.0;
            vertices.extend([Vec3::new(x, 0.0, 0.0), Vec3::new(x + 1.0, 0.0, 0.0), Vec3::new(x, 1.0, 0.0)]);
            elements.extend([i * 3, i * 3 + 1, i * 3 + 2]);
        }
        let tree = MeshTree::new(&vertices, &elements);

        assert_eq!(tree.min_depth(), 1);
        assert_eq!(tree.max_depth(), 2);
        assert_relative_eq!(tree.average_depth(), 5.0 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(tree.balanced_depth(), 3.0f32.log2(), epsilon = 1e-6);
    }

    #[test]
    fn test_empty_tree() {
        let tree = MeshTree::new(&[], &[]);
        assert_eq!(tree.min_depth(), 0);
        assert_eq!(tree.max_depth(), 0);
        assert_relative_eq!(tree.average_depth(), 0.0);
        assert_relative_eq!(tree.balanced_depth(), 0.0);
    }
}

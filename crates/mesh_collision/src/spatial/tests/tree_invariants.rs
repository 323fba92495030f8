//! Structural checks on built trees

use super::{grid, soup};
use crate::config::CollisionConfig;
use crate::foundation::math::{utils, Vec3};
use crate::spatial::{MeshTree, NodeKind};

fn meshes() -> Vec<(Vec<Vec3>, Vec<u32>)> {
    vec![grid(8, false), grid(11, true), soup(200, 7), soup(37, 1234)]
}

#[test]
fn test_bbox_contains_every_vertex() {
    for (vertices, elements) in meshes() {
        let tree = MeshTree::new(&vertices, &elements);
        let bbox = tree.bbox().unwrap();
        for &index in &elements {
            assert!(bbox.contains_point(&vertices[index as usize]));
        }
    }
}

#[test]
fn test_children_nest_and_parents_are_exact_unions() {
    for (vertices, elements) in meshes() {
        let tree = MeshTree::new(&vertices, &elements);
        let nodes = tree.nodes();

        for (index, node) in nodes.iter().enumerate() {
            let NodeKind::Internal(left, right) = node.kind() else {
                continue;
            };
            // Children are emitted before their parent
            assert!(left < index && right < index);

            let (l, r) = (&nodes[left].aabb, &nodes[right].aabb);
            assert!(node.aabb.contains(l));
            assert!(node.aabb.contains(r));
            assert_eq!(node.aabb.min, utils::min_components(&l.min, &r.min));
            assert_eq!(node.aabb.max, utils::max_components(&l.max, &r.max));
        }
    }
}

#[test]
fn test_leaves_bound_exactly_one_triangle_each() {
    for (vertices, elements) in meshes() {
        let tree = MeshTree::new(&vertices, &elements);
        let mut seen = vec![0usize; tree.triangle_count()];

        for node in tree.nodes() {
            let NodeKind::Leaf(t) = node.kind() else {
                continue;
            };
            seen[t] += 1;

            let tri = tree.triangle(t);
            let corners = [tri.v0, tri.v1, tri.v2];
            let min = corners.iter().fold(Vec3::repeat(f32::MAX), |acc, v| utils::min_components(&acc, v));
            let max = corners.iter().fold(Vec3::repeat(f32::MIN), |acc, v| utils::max_components(&acc, v));
            assert_eq!(node.aabb.min, min);
            assert_eq!(node.aabb.max, max);
            assert_eq!((node.left, node.right), (-1, -1));
        }

        assert!(seen.iter().all(|&count| count == 1));
        assert_eq!(tree.nodes().len(), 2 * tree.triangle_count() - 1);
        assert_eq!(tree.root(), Some(tree.nodes().len() - 1));
    }
}

#[test]
fn test_rebuild_is_deterministic() {
    for (vertices, elements) in meshes() {
        let a = MeshTree::new(&vertices, &elements);
        let b = MeshTree::new(&vertices, &elements);

        assert_eq!(a.nodes(), b.nodes());
        assert_eq!(a.min_depth(), b.min_depth());
        assert_eq!(a.max_depth(), b.max_depth());
        assert_eq!(a.average_depth(), b.average_depth());
        assert_eq!(a.balanced_depth(), b.balanced_depth());
    }
}

#[test]
fn test_depth_statistics_are_ordered() {
    for (vertices, elements) in meshes() {
        let tree = MeshTree::new(&vertices, &elements);
        let average = tree.average_depth();

        assert!(tree.min_depth() as f32 <= average);
        assert!(average <= tree.max_depth() as f32);
        // No binary tree has a shallower average than the balanced one
        assert!(average + 1e-4 >= tree.balanced_depth().floor());
        assert!(tree.max_depth() < tree.triangle_count());
    }
}

#[test]
fn test_degenerate_mesh_still_terminates() {
    // Every triangle shares the same centroid
    let vertices = vec![
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 0.0),
    ];
    let elements: Vec<u32> = [0, 1, 4, 2, 3, 4].repeat(32);
    let tree = MeshTree::new(&vertices, &elements);

    assert_eq!(tree.triangle_count(), 64);
    assert_eq!(tree.nodes().len(), 127);
    // Half splits all the way down give a perfectly balanced tree
    assert_eq!(tree.min_depth(), 6);
    assert_eq!(tree.max_depth(), 6);
}

#[test]
fn test_with_config_matches_default_build() {
    let (vertices, elements) = grid(6, true);
    let config = CollisionConfig::default().with_max_tree_depth(64);
    let configured = MeshTree::with_config(&vertices, &elements, &config).unwrap();
    let plain = MeshTree::new(&vertices, &elements);
    assert_eq!(configured.nodes(), plain.nodes());
}

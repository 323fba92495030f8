//! Scenario tests across the tree, its queries and the predicates

mod tree_invariants;

use crate::foundation::math::Vec3;

/// Height of the wavy test surface
pub(super) fn height(x: f32, y: f32) -> f32 {
    0.5 * (0.7 * x).sin() + 0.25 * (1.3 * y).cos()
}

/// `n` by `n` quad grid with unit spacing, two triangles per quad.
///
/// Each quad at `(i, j)` is split along its `(i, j) -> (i+1, j+1)` diagonal
/// into triangles `2 * (j * n + i)` and `2 * (j * n + i) + 1`.
pub(super) fn grid(n: u32, heightfield: bool) -> (Vec<Vec3>, Vec<u32>) {
    let stride = n + 1;
    let mut vertices = Vec::with_capacity((stride * stride) as usize);
    for j in 0..stride {
        for i in 0..stride {
            let (x, y) = (i as f32, j as f32);
            let z = if heightfield { height(x, y) } else { 0.0 };
            vertices.push(Vec3::new(x, y, z));
        }
    }

    let mut elements = Vec::with_capacity((n * n * 6) as usize);
    for j in 0..n {
        for i in 0..n {
            let a = j * stride + i;
            let b = a + 1;
            let c = a + stride + 1;
            let d = a + stride;
            elements.extend_from_slice(&[a, b, c, a, c, d]);
        }
    }
    (vertices, elements)
}

/// Deterministic scatter of small triangles inside a 100 unit cube
pub(super) fn soup(count: usize, seed: u64) -> (Vec<Vec3>, Vec<u32>) {
    let mut state = seed;
    let mut next = move || {
        // Numerical Recipes LCG, top 24 bits mapped to [0, 1)
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        (state >> 40) as f32 / (1u64 << 24) as f32
    };

    let mut vertices = Vec::with_capacity(count * 3);
    for _ in 0..count {
        let anchor = Vec3::new(next(), next(), next()) * 100.0 - Vec3::repeat(50.0);
        for _ in 0..3 {
            let offset = Vec3::new(next(), next(), next()) * 6.0 - Vec3::repeat(3.0);
            vertices.push(anchor + offset);
        }
    }
    let elements = (0..(count * 3) as u32).collect();
    (vertices, elements)
}

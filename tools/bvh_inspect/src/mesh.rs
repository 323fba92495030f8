//! Mesh sources for the inspector

use anyhow::{Context, Result};
use mesh_collision::foundation::math::Vec3;
use std::path::Path;

/// Owned vertex and index buffers
#[derive(Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub elements: Vec<u32>,
}

/// Load every model in an OBJ file into one buffer pair
pub fn load_obj(path: &Path) -> Result<MeshData> {
    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path, &options)
        .with_context(|| format!("Failed to load OBJ file {}", path.display()))?;

    let mut mesh = MeshData::default();
    for model in &models {
        let base = u32::try_from(mesh.vertices.len())
            .context("Too many vertices for 32-bit indices")?;
        mesh.vertices.extend(
            model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );
        mesh.elements
            .extend(model.mesh.indices.iter().map(|&index| base + index));
        log::debug!(
            "Model '{}': {} vertices, {} triangles",
            model.name,
            model.mesh.positions.len() / 3,
            model.mesh.indices.len() / 3
        );
    }

    Ok(mesh)
}

/// `n` by `n` unit quad grid in the z = 0 plane
///
/// Fails when the vertex indices would not fit in 32 bits.
pub fn grid(n: u32) -> Result<MeshData> {
    let stride = n
        .checked_add(1)
        .and_then(|stride| stride.checked_mul(stride).map(|_| stride))
        .with_context(|| format!("Grid size {n} has too many vertices for 32-bit indices"))?;
    let index_count = usize::try_from(n)?
        .checked_mul(usize::try_from(n)?)
        .and_then(|quads| quads.checked_mul(6))
        .with_context(|| format!("Grid size {n} is too large"))?;

    let vertices = (0..stride)
        .flat_map(|j| (0..stride).map(move |i| Vec3::new(i as f32, j as f32, 0.0)))
        .collect();

    let mut elements = Vec::with_capacity(index_count);
    for j in 0..n {
        for i in 0..n {
            let a = j * stride + i;
            elements.extend_from_slice(&[a, a + 1, a + stride + 1, a, a + stride + 1, a + stride]);
        }
    }

    Ok(MeshData { vertices, elements })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_counts() {
        let mesh = grid(3).unwrap();
        assert_eq!(mesh.vertices.len(), 16);
        assert_eq!(mesh.elements.len(), 3 * 3 * 6);
        assert!(mesh.elements.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_grid_too_large_for_indices() {
        assert!(grid(70_000).is_err());
        assert!(grid(u32::MAX).is_err());
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use crate::bounds::BoundingBox;
use nalgebra::Point3;

/// Indexed triangle mesh with flat position/normal buffers.
///
/// Positions and normals are laid out `[x0, y0, z0, x1, y1, z1, ...]` in the
/// consumer's Y-up system; indices reference vertices in triples. Decoded
/// normals are unit length for every vertex referenced by at least one
/// triangle and zero for unreferenced vertices.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Merge another mesh into this one, offsetting its indices.
    pub fn merge(&mut self, other: &Mesh) {
        if other.is_empty() {
            return;
        }

        let vertex_offset = (self.positions.len() / 3) as u32;

        self.positions.reserve(other.positions.len());
        self.normals.reserve(other.normals.len());
        self.indices.reserve(other.indices.len());

        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + vertex_offset));
    }

    /// Calculate bounds over all vertex positions.
    pub fn bounds(&self) -> BoundingBox {
        if self.is_empty() {
            return BoundingBox::zero();
        }

        let mut bbox = BoundingBox::new(
            Point3::new(f32::MAX, f32::MAX, f32::MAX),
            Point3::new(f32::MIN, f32::MIN, f32::MIN),
        );
        self.positions.chunks_exact(3).for_each(|chunk| {
            bbox.expand(Point3::new(chunk[0], chunk[1], chunk[2]));
        });
        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_merge() {
        let mut mesh1 = Mesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![0.0; 9],
            indices: vec![0, 1, 2],
        };
        let mesh2 = Mesh {
            positions: vec![0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0],
            normals: vec![0.0; 9],
            indices: vec![0, 1, 2],
        };

        mesh1.merge(&mesh2);
        assert_eq!(mesh1.vertex_count(), 6);
        assert_eq!(mesh1.triangle_count(), 2);
        assert_eq!(&mesh1.indices[3..], &[3, 4, 5]);
    }

    #[test]
    fn test_bounds() {
        let mesh = Mesh {
            positions: vec![-1.0, 0.0, 2.0, 3.0, -4.0, 0.5],
            normals: vec![0.0; 6],
            indices: vec![],
        };
        let bbox = mesh.bounds();
        assert_eq!(bbox.min, Point3::new(-1.0, -4.0, 0.5));
        assert_eq!(bbox.max, Point3::new(3.0, 0.0, 2.0));
    }
}

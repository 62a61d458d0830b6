// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry block parser.
//!
//! A geometry block is a sub-version byte, vertex and triangle counts, the
//! position array, then a list of face records. A face starts with a signed
//! triangle count: positive means planar (one packed normal shared by all
//! corners, then the indices), negative means non-planar (one
//! `(index, u, v)` record per corner). Index width is 1, 2 or 4 bytes,
//! chosen once per block from the vertex count.
//!
//! Smooth shading comes from accumulation: every corner's decoded normal is
//! summed into its vertex with a contribution count, and after all faces the
//! mean is renormalized to unit length. Vertices no triangle references keep
//! a zero normal.

use crate::cursor::ByteCursor;
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::normals::decode_normal;
use nalgebra::Vector3;

/// Triangle index width, a closed set selected per block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexWidth {
    U8,
    U16,
    U32,
}

impl IndexWidth {
    /// Narrowest width that can address `vertex_count` vertices.
    #[inline]
    pub fn for_vertex_count(vertex_count: u32) -> Self {
        if vertex_count <= 0xFF {
            IndexWidth::U8
        } else if vertex_count <= 0xFFFF {
            IndexWidth::U16
        } else {
            IndexWidth::U32
        }
    }

    /// Reader picked once per block so the face loop stays monomorphic.
    fn reader(self) -> fn(&mut ByteCursor) -> Result<u32> {
        match self {
            IndexWidth::U8 => |c| c.read_u8().map(u32::from),
            IndexWidth::U16 => |c| c.read_u16().map(u32::from),
            IndexWidth::U32 => |c| c.read_u32(),
        }
    }
}

/// Accumulates per-corner normals into per-vertex smooth normals.
struct NormalAccumulator {
    sums: Vec<Vector3<f32>>,
    contributions: Vec<u32>,
}

impl NormalAccumulator {
    fn new(vertex_count: usize) -> Self {
        Self {
            sums: vec![Vector3::zeros(); vertex_count],
            contributions: vec![0; vertex_count],
        }
    }

    #[inline]
    fn add(&mut self, vertex: usize, normal: Vector3<f32>) {
        self.sums[vertex] += normal;
        self.contributions[vertex] += 1;
    }

    /// Mean and renormalize; untouched vertices stay zero.
    fn finish(self) -> Vec<f32> {
        let mut normals = vec![0.0f32; self.sums.len() * 3];
        for (i, (sum, count)) in self
            .sums
            .iter()
            .zip(&self.contributions)
            .enumerate()
        {
            if *count == 0 {
                continue;
            }
            let mean = sum / *count as f32;
            let length = mean.norm();
            if length > f32::EPSILON {
                let unit = mean / length;
                normals[i * 3] = unit.x;
                normals[i * 3 + 1] = unit.y;
                normals[i * 3 + 2] = unit.z;
            }
        }
        normals
    }
}

/// Parse one geometry block into a mesh.
///
/// The cursor is expected to be a sub-cursor bounded to the block's declared
/// length; the caller checks `is_at_end` afterwards to detect trailing
/// bytes. Errors here are block-local: the driver demotes them to
/// diagnostics and drops the block.
pub fn read_geometry(cursor: &mut ByteCursor) -> Result<Mesh> {
    let sub_version = cursor.read_u8()?;
    let vertex_count = cursor.read_count("vertex")?;
    let triangle_count = cursor.read_count("triangle")?;
    tracing::trace!(sub_version, vertex_count, triangle_count, "geometry block");

    let raw = cursor.read_f32_array(vertex_count as usize * 3)?;
    let mut positions = Vec::with_capacity(raw.len());
    for chunk in raw.chunks_exact(3) {
        // Z-up to Y-up on write.
        positions.extend_from_slice(&[chunk[0], chunk[2], chunk[1]]);
    }

    let read_index = IndexWidth::for_vertex_count(vertex_count).reader();
    let expected_indices = triangle_count as usize * 3;
    let mut indices = Vec::with_capacity(expected_indices);
    let mut accumulator = NormalAccumulator::new(vertex_count as usize);

    let face_count = cursor.read_count("face")?;
    for _ in 0..face_count {
        let signed = cursor.read_i32()?;
        if signed == 0 {
            continue;
        }
        let planar = signed > 0;
        let triangles = signed.unsigned_abs() as usize;

        if planar {
            let u = cursor.read_u8()?;
            let v = cursor.read_u8()?;
            let normal = decode_normal(u, v);
            for _ in 0..triangles * 3 {
                let index = read_index(cursor)?;
                if index >= vertex_count {
                    return Err(Error::IndexOutOfRange {
                        index,
                        vertex_count,
                    });
                }
                indices.push(index);
                accumulator.add(index as usize, normal);
            }
        } else {
            for _ in 0..triangles * 3 {
                let index = read_index(cursor)?;
                let u = cursor.read_u8()?;
                let v = cursor.read_u8()?;
                if index >= vertex_count {
                    return Err(Error::IndexOutOfRange {
                        index,
                        vertex_count,
                    });
                }
                indices.push(index);
                accumulator.add(index as usize, decode_normal(u, v));
            }
        }
    }

    if indices.len() != expected_indices {
        return Err(Error::CountMismatch {
            written: indices.len(),
            expected: expected_indices,
        });
    }

    Ok(Mesh {
        positions,
        normals: accumulator.finish(),
        indices,
    })
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimal WexBIM writer for the scene tests: version 4 files with one
//! region and explicit shape/geometry specs per block.

pub const MAGIC: i32 = 94_132_117;

/// (product label, instance label, style id, optional column-major transform)
pub type Shape = (i32, i32, i32, Option<[f64; 16]>);

pub struct Block {
    pub shapes: Vec<Shape>,
    /// Producer-space vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Planar faces: packed normal plus triangle indices.
    pub faces: Vec<((u8, u8), Vec<u8>)>,
}

impl Block {
    /// Unit triangle in the producer's XY plane, normal up.
    pub fn triangle(shapes: Vec<Shape>) -> Self {
        Self {
            shapes,
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            faces: vec![((128, 128), vec![0, 1, 2])],
        }
    }
}

pub fn identity() -> [f64; 16] {
    let mut m = [0.0; 16];
    m[0] = 1.0;
    m[5] = 1.0;
    m[10] = 1.0;
    m[15] = 1.0;
    m
}

pub fn translation(x: f64, y: f64, z: f64) -> [f64; 16] {
    let mut m = identity();
    m[12] = x;
    m[13] = y;
    m[14] = z;
    m
}

/// Build a version 4 file: given styles, products `(label, type)`, and one
/// region containing the blocks.
pub fn build_file(
    styles: &[(i32, [f32; 4])],
    products: &[(i32, i16)],
    blocks: &[Block],
) -> Vec<u8> {
    let shape_count: i32 = blocks.iter().map(|b| b.shapes.len() as i32).sum();
    let vertex_count: i32 = blocks.iter().map(|b| b.positions.len() as i32).sum();
    let triangle_count: i32 = blocks
        .iter()
        .flat_map(|b| b.faces.iter())
        .map(|(_, indices)| (indices.len() / 3) as i32)
        .sum();
    let matrix_count: i32 = blocks
        .iter()
        .flat_map(|b| b.shapes.iter())
        .filter(|s| s.3.is_some())
        .count() as i32;

    let mut out = Vec::new();
    push_i32(&mut out, MAGIC);
    out.push(4u8);
    push_i32(&mut out, shape_count);
    push_i32(&mut out, vertex_count);
    push_i32(&mut out, triangle_count);
    push_i32(&mut out, matrix_count);
    push_i32(&mut out, products.len() as i32);
    push_i32(&mut out, styles.len() as i32);
    push_f32(&mut out, 1.0);
    for _ in 0..3 {
        out.extend_from_slice(&0.0f64.to_le_bytes());
    }
    out.extend_from_slice(&1i16.to_le_bytes());

    // Region.
    push_i32(&mut out, shape_count);
    for v in [0.0f32; 3] {
        push_f32(&mut out, v);
    }
    for v in [0.0f32, 0.0, 0.0, 1.0, 1.0, 1.0] {
        push_f32(&mut out, v);
    }

    for (id, rgba) in styles {
        push_i32(&mut out, *id);
        for c in rgba {
            push_f32(&mut out, *c);
        }
    }

    for (label, type_id) in products {
        push_i32(&mut out, *label);
        out.extend_from_slice(&type_id.to_le_bytes());
        for v in [0.0f32; 6] {
            push_f32(&mut out, v);
        }
    }

    push_i32(&mut out, blocks.len() as i32);
    for block in blocks {
        push_i32(&mut out, block.shapes.len() as i32);
        for (product, instance, style, transform) in &block.shapes {
            push_i32(&mut out, *product);
            out.extend_from_slice(&1i16.to_le_bytes());
            push_i32(&mut out, *instance);
            push_i32(&mut out, *style);
            if block.shapes.len() > 1 {
                for v in transform.unwrap_or_else(identity) {
                    out.extend_from_slice(&v.to_le_bytes());
                }
            }
        }

        let mut payload = vec![1u8];
        push_i32(&mut payload, block.positions.len() as i32);
        let triangles: i32 = block
            .faces
            .iter()
            .map(|(_, indices)| (indices.len() / 3) as i32)
            .sum();
        push_i32(&mut payload, triangles);
        for p in &block.positions {
            for c in p {
                push_f32(&mut payload, *c);
            }
        }
        push_i32(&mut payload, block.faces.len() as i32);
        for ((u, v), indices) in &block.faces {
            push_i32(&mut payload, (indices.len() / 3) as i32);
            payload.push(*u);
            payload.push(*v);
            payload.extend_from_slice(indices);
        }
        push_i32(&mut out, payload.len() as i32);
        out.extend_from_slice(&payload);
    }

    out
}

fn push_i32(out: &mut Vec<u8>, v: i32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn push_f32(out: &mut Vec<u8>, v: f32) {
    out.extend_from_slice(&v.to_le_bytes());
}

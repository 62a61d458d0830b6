// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-code WexBIM writer used to build synthetic files for the decode tests.
//!
//! Mirrors the byte-exact layout the decoder consumes: header, regions,
//! styles, products, then per-region geometry blocks (shape instances plus a
//! length-prefixed mesh section for version ≥ 3).

pub const MAGIC: i32 = 94_132_117;

#[derive(Clone)]
pub struct ShapeSpec {
    pub product: i32,
    pub instance_type: i16,
    pub instance_label: i32,
    pub style: i32,
    pub transform: Option<[f64; 16]>,
}

impl ShapeSpec {
    pub fn new(product: i32, instance_label: i32, style: i32) -> Self {
        Self {
            product,
            instance_type: 1,
            instance_label,
            style,
            transform: None,
        }
    }

    pub fn with_transform(mut self, transform: [f64; 16]) -> Self {
        self.transform = Some(transform);
        self
    }
}

#[derive(Clone)]
pub enum FaceSpec {
    /// Positive triangle count, one shared packed normal, then indices.
    Planar {
        normal: (u8, u8),
        indices: Vec<u32>,
    },
    /// Negative triangle count, one (index, u, v) record per corner.
    NonPlanar { corners: Vec<(u32, u8, u8)> },
}

#[derive(Clone)]
pub struct GeometrySpec {
    pub sub_version: u8,
    pub positions: Vec<[f32; 3]>,
    pub faces: Vec<FaceSpec>,
    /// Override the declared triangle count (defaults to the real count).
    pub triangle_count: Option<i32>,
}

impl GeometrySpec {
    pub fn new(positions: Vec<[f32; 3]>, faces: Vec<FaceSpec>) -> Self {
        Self {
            sub_version: 1,
            positions,
            faces,
            triangle_count: None,
        }
    }

    /// Single planar triangle in the producer's XY plane, normal up.
    pub fn unit_triangle() -> Self {
        Self::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![FaceSpec::Planar {
                normal: (128, 128),
                indices: vec![0, 1, 2],
            }],
        )
    }

    fn declared_triangles(&self) -> i32 {
        if let Some(count) = self.triangle_count {
            return count;
        }
        self.faces
            .iter()
            .map(|f| match f {
                FaceSpec::Planar { indices, .. } => (indices.len() / 3) as i32,
                FaceSpec::NonPlanar { corners } => (corners.len() / 3) as i32,
            })
            .sum()
    }

    fn real_triangles(&self) -> i32 {
        let spec = Self {
            triangle_count: None,
            ..self.clone()
        };
        spec.declared_triangles()
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.push(self.sub_version);
        push_i32(out, self.positions.len() as i32);
        push_i32(out, self.declared_triangles());
        for p in &self.positions {
            for c in p {
                push_f32(out, *c);
            }
        }
        let width = index_width(self.positions.len() as u32);
        push_i32(out, self.faces.len() as i32);
        for face in &self.faces {
            match face {
                FaceSpec::Planar { normal, indices } => {
                    push_i32(out, (indices.len() / 3) as i32);
                    out.push(normal.0);
                    out.push(normal.1);
                    for &index in indices {
                        push_index(out, index, width);
                    }
                }
                FaceSpec::NonPlanar { corners } => {
                    push_i32(out, -((corners.len() / 3) as i32));
                    for &(index, u, v) in corners {
                        push_index(out, index, width);
                        out.push(u);
                        out.push(v);
                    }
                }
            }
        }
    }
}

#[derive(Clone)]
pub struct BlockSpec {
    pub shapes: Vec<ShapeSpec>,
    pub geometry: GeometrySpec,
    /// Extra bytes appended inside the declared geometry length.
    pub trailing: usize,
}

impl BlockSpec {
    pub fn new(shapes: Vec<ShapeSpec>, geometry: GeometrySpec) -> Self {
        Self {
            shapes,
            geometry,
            trailing: 0,
        }
    }
}

#[derive(Clone)]
pub struct RegionSpec {
    pub population: i32,
    pub centre: [f32; 3],
    pub bbox: [f32; 6],
    pub blocks: Vec<BlockSpec>,
}

impl RegionSpec {
    pub fn new(blocks: Vec<BlockSpec>) -> Self {
        Self {
            population: blocks.len() as i32,
            centre: [0.0; 3],
            bbox: [0.0, 0.0, 0.0, 1.0, 1.0, 0.0],
            blocks,
        }
    }
}

#[derive(Clone)]
pub struct FileBuilder {
    pub version: u8,
    pub meter: f32,
    pub world_origin: [f64; 3],
    pub regions: Vec<RegionSpec>,
    pub styles: Vec<(i32, [f32; 4])>,
    pub products: Vec<(i32, i16, [f32; 6])>,
}

impl FileBuilder {
    pub fn new(version: u8) -> Self {
        Self {
            version,
            meter: 1.0,
            world_origin: [0.0; 3],
            regions: Vec::new(),
            styles: Vec::new(),
            products: Vec::new(),
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let blocks = || self.regions.iter().flat_map(|r| r.blocks.iter());
        let shape_count: i32 = blocks().map(|b| b.shapes.len() as i32).sum();
        let vertex_count: i32 = blocks().map(|b| b.geometry.positions.len() as i32).sum();
        let triangle_count: i32 = blocks().map(|b| b.geometry.real_triangles()).sum();
        let matrix_count: i32 = blocks()
            .flat_map(|b| b.shapes.iter())
            .filter(|s| s.transform.is_some())
            .count() as i32;

        let mut out = Vec::new();
        push_i32(&mut out, MAGIC);
        out.push(self.version);
        push_i32(&mut out, shape_count);
        push_i32(&mut out, vertex_count);
        push_i32(&mut out, triangle_count);
        push_i32(&mut out, matrix_count);
        push_i32(&mut out, self.products.len() as i32);
        push_i32(&mut out, self.styles.len() as i32);
        push_f32(&mut out, self.meter);
        if self.version > 3 {
            for c in self.world_origin {
                out.extend_from_slice(&c.to_le_bytes());
            }
        }
        out.extend_from_slice(&(self.regions.len() as i16).to_le_bytes());

        for region in &self.regions {
            push_i32(&mut out, region.population);
            for c in region.centre {
                push_f32(&mut out, c);
            }
            for c in region.bbox {
                push_f32(&mut out, c);
            }
        }

        for (id, rgba) in &self.styles {
            push_i32(&mut out, *id);
            for c in rgba {
                push_f32(&mut out, *c);
            }
        }

        for (label, type_id, bbox) in &self.products {
            push_i32(&mut out, *label);
            out.extend_from_slice(&type_id.to_le_bytes());
            for c in bbox {
                push_f32(&mut out, *c);
            }
        }

        for region in &self.regions {
            if self.version >= 3 {
                push_i32(&mut out, region.blocks.len() as i32);
            }
            for block in &region.blocks {
                self.write_block(&mut out, block);
            }
        }

        out
    }

    fn write_block(&self, out: &mut Vec<u8>, block: &BlockSpec) {
        push_i32(out, block.shapes.len() as i32);
        for shape in &block.shapes {
            push_i32(out, shape.product);
            out.extend_from_slice(&shape.instance_type.to_le_bytes());
            push_i32(out, shape.instance_label);
            push_i32(out, shape.style);
            if block.shapes.len() > 1 {
                let transform = shape.transform.unwrap_or(IDENTITY);
                for v in transform {
                    if self.version < 2 {
                        push_f32(out, v as f32);
                    } else {
                        out.extend_from_slice(&v.to_le_bytes());
                    }
                }
            }
        }

        let mut payload = Vec::new();
        block.geometry.write(&mut payload);
        payload.extend(std::iter::repeat(0xAAu8).take(block.trailing));
        if self.version >= 3 {
            push_i32(out, payload.len() as i32);
        }
        out.extend_from_slice(&payload);
    }
}

/// Column-major identity matrix.
pub const IDENTITY: [f64; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// Column-major translation matrix.
pub fn translation(x: f64, y: f64, z: f64) -> [f64; 16] {
    let mut m = IDENTITY;
    m[12] = x;
    m[13] = y;
    m[14] = z;
    m
}

fn index_width(vertex_count: u32) -> usize {
    if vertex_count <= 0xFF {
        1
    } else if vertex_count <= 0xFFFF {
        2
    } else {
        4
    }
}

fn push_index(out: &mut Vec<u8>, index: u32, width: usize) {
    match width {
        1 => out.push(index as u8),
        2 => out.extend_from_slice(&(index as u16).to_le_bytes()),
        _ => out.extend_from_slice(&index.to_le_bytes()),
    }
}

fn push_i32(out: &mut Vec<u8>, v: i32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn push_f32(out: &mut Vec<u8>, v: f32) {
    out.extend_from_slice(&v.to_le_bytes());
}

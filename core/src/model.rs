// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One-shot model decode.
//!
//! [`parse_model`] drains a [`BlockStream`] and returns the complete decoded
//! model: the immutable tables from the prelude, every surviving geometry
//! block in file order, and the diagnostics for blocks that were damaged.

use crate::error::{Diagnostic, Result};
use crate::header::Header;
use crate::mesh::Mesh;
use crate::product::ProductTable;
use crate::region::Region;
use crate::shape::ShapeInstance;
use crate::streaming::{BlockEvent, BlockStream, StreamConfig};
use crate::style::StylePalette;

/// One decoded geometry block: a shared mesh plus the shape instances that
/// reference it.
#[derive(Debug, Clone)]
pub struct GeometryBlock {
    /// Index of the owning region (file order).
    pub region: usize,
    pub shapes: Vec<ShapeInstance>,
    pub mesh: Mesh,
}

/// Fully decoded WexBIM model.
#[derive(Debug)]
pub struct Model {
    pub header: Header,
    pub regions: Vec<Region>,
    pub styles: StylePalette,
    pub products: ProductTable,
    /// Surviving geometry blocks in file order.
    pub blocks: Vec<GeometryBlock>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Model {
    /// Number of blocks dropped as corrupt.
    pub fn dropped_blocks(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.dropped_block())
            .count()
    }
}

/// Decode a complete WexBIM byte buffer in one pass.
pub fn parse_model(bytes: &[u8]) -> Result<Model> {
    let mut stream = BlockStream::new(bytes, StreamConfig::default())?;
    let mut blocks = Vec::new();
    while let Some(event) = stream.next() {
        if let BlockEvent::Block(block) = event? {
            blocks.push(block);
        }
    }
    Ok(stream.into_model(blocks))
}

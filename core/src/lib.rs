// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # WexBIM-Lite Core Decoder
//!
//! Decoder for the WexBIM binary interchange format: compact triangulated
//! BIM geometry as produced by the Xbim toolchain.
//!
//! ## Overview
//!
//! A WexBIM stream is a header followed by region, style and product tables
//! and then geometry blocks (shape instances plus an indexed triangle mesh).
//! This crate provides:
//!
//! - **Binary cursor**: typed little-endian readers with bounded sub-cursors
//!   for length-prefixed sections
//! - **Table parsers**: regions, an indexed style palette with sentinel
//!   entries, and products with stable render ids
//! - **Geometry decode**: per-block index-width selection, packed-normal
//!   decode and smooth per-vertex normal accumulation
//! - **Axis remap**: the fixed Z-up → Y-up swap applied uniformly to
//!   positions, normals, bounds and transforms
//! - **Streaming**: a block iterator with progress events for cooperative
//!   hosts
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wexbim_lite_core::parse_model;
//!
//! let bytes = std::fs::read("model.wexbim")?;
//! let model = parse_model(&bytes)?;
//!
//! for block in &model.blocks {
//!     println!(
//!         "{} shapes, {} triangles",
//!         block.shapes.len(),
//!         block.mesh.triangle_count()
//!     );
//! }
//! for diagnostic in &model.diagnostics {
//!     eprintln!("block {}: {:?}", diagnostic.block, diagnostic.issue);
//! }
//! ```
//!
//! ## Streaming
//!
//! For interactive hosts, pump blocks one at a time and yield between them:
//!
//! ```rust,ignore
//! use wexbim_lite_core::{BlockEvent, BlockStream, StreamConfig};
//!
//! let mut stream = BlockStream::new(&bytes, StreamConfig::default())?;
//! while let Some(event) = stream.next() {
//!     match event? {
//!         BlockEvent::Block(block) => upload(block),
//!         BlockEvent::Progress { bytes_consumed, bytes_total } => {
//!             report(bytes_consumed, bytes_total)
//!         }
//!         BlockEvent::Completed { .. } => break,
//!     }
//! }
//! ```
//!
//! ## Failure semantics
//!
//! Structural errors (bad magic, unsupported version, truncation) abort the
//! decode. Damage confined to one block's length-prefixed geometry section
//! drops that block and is reported through [`Diagnostic`]s, so a single
//! broken product does not lose the model.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for the decoded tables

pub mod axes;
pub mod bounds;
pub mod cursor;
pub mod error;
pub mod geometry;
pub mod header;
pub mod mesh;
pub mod model;
pub mod normals;
pub mod product;
pub mod region;
pub mod shape;
pub mod streaming;
pub mod style;

pub use bounds::BoundingBox;
pub use cursor::ByteCursor;
pub use error::{BlockIssue, Diagnostic, Error, Result};
pub use geometry::{read_geometry, IndexWidth};
pub use header::{Header, WorldOrigin, MAGIC, MAX_VERSION};
pub use mesh::Mesh;
pub use model::{parse_model, GeometryBlock, Model};
pub use normals::{decode_normal, encode_normal};
pub use product::{is_opening_or_space, Product, ProductTable, OPENING_TYPE, SPACE_TYPE};
pub use region::{most_populated, read_regions, Region};
pub use shape::{read_shapes, ShapeInstance};
pub use streaming::{BlockEvent, BlockStream, StreamConfig};
pub use style::{Style, StylePalette, OPENING_STYLE, TRANSPARENCY_CUTOFF, UNKNOWN_STYLE};

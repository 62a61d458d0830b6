// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # WexBIM-Lite Scene Assembly
//!
//! Turns a decoded WexBIM model into a renderable scene graph: one mesh
//! node per singleton shape, one instanced node (shared geometry,
//! per-instance transforms) per style partition of a repeated shape, each
//! tagged with style-derived materials and product identity for picking.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wexbim_lite_scene::load;
//!
//! let bytes = std::fs::read("model.wexbim")?;
//! let scene = load(&bytes)?;
//!
//! for node in &scene.nodes {
//!     draw(
//!         &node.geometry,
//!         &node.material,
//!         node.instance_count(),
//!         node.user_data.product_label,
//!     );
//! }
//! ```
//!
//! ## Cooperative loading
//!
//! [`load_streaming`] runs a host hook between geometry blocks so an
//! interactive host stays responsive; returning `false` from the hook stops
//! the decode at the next block boundary and yields the partial scene.

pub mod assembler;
pub mod error;
pub mod material;
pub mod node;

pub use assembler::{load, load_streaming, load_with, SceneOptions};
pub use error::{Error, Result};
pub use material::{DefaultMaterialFactory, Material, MaterialFactory};
pub use node::{MeshInstance, MeshNode, NodeKind, SceneRoot, UserData};

// The format-level types hosts need alongside the scene.
pub use wexbim_lite_core::{
    BlockIssue, BoundingBox, Diagnostic, Mesh, Product, Region, StreamConfig, Style, StylePalette,
    WorldOrigin,
};

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene graph emitted by the assembler.
//!
//! A scene is an ordered list of mesh nodes. A node is either a singleton
//! (one shape, optional transform) or instanced (one shared geometry buffer
//! with a non-empty transform list). Geometry is owned by the scene and
//! shared by reference across the style partitions of one block; instances
//! own only their transforms. There is no back-reference from geometry to
//! instances.

use crate::material::Material;
use nalgebra::Matrix4;
use std::sync::Arc;
use wexbim_lite_core::{
    BoundingBox, Diagnostic, Mesh, ProductTable, Region, StylePalette, WorldOrigin,
};

/// Identity carried by every mesh so downstream picking can recover the hit
/// element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserData {
    pub model_id: u32,
    pub product_label: i32,
    pub instance_label: i32,
    pub style_id: i32,
}

/// One appearance of the shared geometry inside an instanced node.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshInstance {
    pub transform: Matrix4<f64>,
    pub product_label: i32,
    pub instance_label: i32,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    /// One shape; the transform is `None` when the geometry is baked in
    /// model space.
    Singleton { transform: Option<Matrix4<f64>> },
    /// One geometry buffer drawn once per instance transform.
    Instanced { instances: Vec<MeshInstance> },
}

/// A renderable mesh node.
#[derive(Debug, Clone)]
pub struct MeshNode {
    pub geometry: Arc<Mesh>,
    pub material: Arc<Material>,
    /// For instanced nodes the labels are the first instance's; the full
    /// per-instance labels ride on the instance list.
    pub user_data: UserData,
    pub kind: NodeKind,
}

impl MeshNode {
    #[inline]
    pub fn is_instanced(&self) -> bool {
        matches!(self.kind, NodeKind::Instanced { .. })
    }

    /// Number of times the geometry is drawn.
    pub fn instance_count(&self) -> usize {
        match &self.kind {
            NodeKind::Singleton { .. } => 1,
            NodeKind::Instanced { instances } => instances.len(),
        }
    }
}

/// Assembled scene: tables from the prelude plus mesh nodes in file order.
#[derive(Debug)]
pub struct SceneRoot {
    pub model_id: u32,
    /// Model units per meter.
    pub meter: f32,
    pub world_origin: WorldOrigin,
    pub regions: Vec<Region>,
    pub styles: StylePalette,
    pub products: ProductTable,
    pub nodes: Vec<MeshNode>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SceneRoot {
    /// Union of the region bounds, the envelope viewers frame on load.
    pub fn bounds(&self) -> BoundingBox {
        let mut iter = self.regions.iter();
        let first = match iter.next() {
            Some(region) => region.bbox,
            None => return BoundingBox::zero(),
        };
        iter.fold(first, |acc, region| acc.union(&region.bbox))
    }

    /// Nodes referencing a given product label.
    pub fn nodes_for_product(&self, label: i32) -> impl Iterator<Item = &MeshNode> {
        self.nodes.iter().filter(move |node| match &node.kind {
            NodeKind::Singleton { .. } => node.user_data.product_label == label,
            NodeKind::Instanced { instances } => {
                instances.iter().any(|i| i.product_label == label)
            }
        })
    }
}

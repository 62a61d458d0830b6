// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene assembly.
//!
//! Pairs each decoded geometry block with its shape-instance list and emits
//! mesh nodes: a singleton node for a lone shape, or one instanced node per
//! effective-style partition when the geometry is repeated. All partitions
//! of one block share the same geometry buffer.

use crate::error::Result;
use crate::material::{DefaultMaterialFactory, MaterialCache, MaterialFactory};
use crate::node::{MeshInstance, MeshNode, NodeKind, SceneRoot, UserData};
use nalgebra::Matrix4;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use wexbim_lite_core::{BlockEvent, BlockStream, GeometryBlock, StreamConfig, StylePalette};

/// Scene assembly options.
#[derive(Debug, Clone, Default)]
pub struct SceneOptions {
    /// Host-assigned id stamped into every node's user data, so picking can
    /// tell models apart when several are loaded.
    pub model_id: u32,
    pub stream: StreamConfig,
}

/// Decode a WexBIM buffer into a scene with default options and materials.
pub fn load(bytes: &[u8]) -> Result<SceneRoot> {
    load_with(bytes, &SceneOptions::default(), &DefaultMaterialFactory)
}

/// Decode with explicit options and a custom material factory.
pub fn load_with(
    bytes: &[u8],
    options: &SceneOptions,
    factory: &dyn MaterialFactory,
) -> Result<SceneRoot> {
    load_streaming(bytes, options, factory, |_, _| true)
}

/// Decode cooperatively: `yield_hook(bytes_consumed, bytes_total)` runs
/// between blocks and may return `false` to stop early. The scene assembled
/// so far is returned; an abandoned decode has no other effect.
pub fn load_streaming(
    bytes: &[u8],
    options: &SceneOptions,
    factory: &dyn MaterialFactory,
    mut yield_hook: impl FnMut(usize, usize) -> bool,
) -> Result<SceneRoot> {
    let mut stream = BlockStream::new(bytes, options.stream.clone())?;
    let mut cache = MaterialCache::new(factory);
    let mut nodes = Vec::new();

    while let Some(event) = stream.next() {
        match event? {
            BlockEvent::Block(block) => {
                assemble_block(
                    block,
                    options.model_id,
                    stream.styles(),
                    &mut cache,
                    &mut nodes,
                );
            }
            BlockEvent::Progress {
                bytes_consumed,
                bytes_total,
            } => {
                if !yield_hook(bytes_consumed, bytes_total) {
                    tracing::debug!(bytes_consumed, "scene load stopped by host");
                    break;
                }
            }
            BlockEvent::Completed { .. } => break,
        }
    }

    let model = stream.into_model(Vec::new());
    Ok(SceneRoot {
        model_id: options.model_id,
        meter: model.header.meter,
        world_origin: model.header.world_origin,
        regions: model.regions,
        styles: model.styles,
        products: model.products,
        nodes,
        diagnostics: model.diagnostics,
    })
}

/// Emit the node(s) for one decoded block.
fn assemble_block(
    block: GeometryBlock,
    model_id: u32,
    styles: &StylePalette,
    cache: &mut MaterialCache,
    nodes: &mut Vec<MeshNode>,
) {
    if block.shapes.is_empty() {
        return;
    }

    let geometry = Arc::new(block.mesh);

    if let [shape] = block.shapes.as_slice() {
        nodes.push(MeshNode {
            geometry,
            material: cache.get(styles.lookup(shape.style_id)),
            user_data: UserData {
                model_id,
                product_label: shape.product_label,
                instance_label: shape.instance_label,
                style_id: shape.style_id,
            },
            kind: NodeKind::Singleton {
                transform: shape.transform,
            },
        });
        return;
    }

    // Partition by effective style, preserving first-appearance order.
    let mut order: Vec<i32> = Vec::new();
    let mut partitions: FxHashMap<i32, Vec<MeshInstance>> = FxHashMap::default();
    let mut first_labels: FxHashMap<i32, (i32, i32)> = FxHashMap::default();

    for shape in &block.shapes {
        let instances = partitions.entry(shape.style_id).or_insert_with(|| {
            order.push(shape.style_id);
            first_labels.insert(shape.style_id, (shape.product_label, shape.instance_label));
            Vec::new()
        });
        instances.push(MeshInstance {
            transform: shape.transform.unwrap_or_else(Matrix4::identity),
            product_label: shape.product_label,
            instance_label: shape.instance_label,
        });
    }

    for style_id in order {
        let instances = partitions.remove(&style_id).unwrap_or_default();
        let (product_label, instance_label) = first_labels[&style_id];
        nodes.push(MeshNode {
            geometry: geometry.clone(),
            material: cache.get(styles.lookup(style_id)),
            user_data: UserData {
                model_id,
                product_label,
                instance_label,
                style_id,
            },
            kind: NodeKind::Instanced { instances },
        });
    }
}

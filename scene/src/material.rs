// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Style to material mapping.
//!
//! Each style id is materialized into a physically-based descriptor on
//! first use and cached; every node carrying that style shares one
//! [`Material`] by reference. Hosts with their own shading model plug in a
//! [`MaterialFactory`].

use rustc_hash::FxHashMap;
use std::sync::Arc;
use wexbim_lite_core::{Style, TRANSPARENCY_CUTOFF};

/// Physically-based material descriptor derived from a style.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    /// RGBA base color in [0, 1].
    pub base_color: [f32; 4],
    pub transparent: bool,
    pub opacity: f32,
    /// BIM surfaces are routinely viewed from inside and outside.
    pub double_sided: bool,
    /// Hint that flat shading is acceptable for this material.
    pub flat_shading: bool,
    /// Small emissive term so unlit regions never render pure black.
    pub emissive: [f32; 3],
}

/// Maps style descriptors to materials.
pub trait MaterialFactory {
    fn create(&self, style: &Style) -> Material;
}

/// Default PBR mapping: base color from the style's RGBA, two-sided, with
/// an emissive term at 10% of the base color.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMaterialFactory;

impl MaterialFactory for DefaultMaterialFactory {
    fn create(&self, style: &Style) -> Material {
        let [r, g, b, a] = style.rgba;
        Material {
            base_color: style.rgba,
            transparent: a < TRANSPARENCY_CUTOFF,
            opacity: a,
            double_sided: true,
            flat_shading: false,
            emissive: [r * 0.1, g * 0.1, b * 0.1],
        }
    }
}

/// Per-decode material cache keyed by style id.
pub(crate) struct MaterialCache<'a> {
    factory: &'a dyn MaterialFactory,
    by_style: FxHashMap<i32, Arc<Material>>,
}

impl<'a> MaterialCache<'a> {
    pub fn new(factory: &'a dyn MaterialFactory) -> Self {
        Self {
            factory,
            by_style: FxHashMap::default(),
        }
    }

    pub fn get(&mut self, style: &Style) -> Arc<Material> {
        self.by_style
            .entry(style.id)
            .or_insert_with(|| Arc::new(self.factory.create(style)))
            .clone()
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Product table.
//!
//! Products are the building-element identities of the model: a label, a
//! product type and a bounding box. Many shape instances may reference one
//! product. Openings (type 3) and spaces (type 4) start out hidden so hosts
//! can suppress them by default.

use crate::bounds::BoundingBox;
use crate::cursor::ByteCursor;
use crate::error::Result;
use rustc_hash::FxHashMap;

/// Product type id for opening elements.
pub const OPENING_TYPE: i16 = 3;

/// Product type id for spaces.
pub const SPACE_TYPE: i16 = 4;

/// Whether a product type gets the forced `-2` style and the hidden marker.
#[inline]
pub fn is_opening_or_space(type_id: i16) -> bool {
    type_id == OPENING_TYPE || type_id == SPACE_TYPE
}

/// Building element identity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Product {
    pub label: i32,
    pub type_id: i16,
    pub bbox: BoundingBox,
    /// 1-based index in parse order, stable across decodes of the same file.
    pub render_id: u32,
    /// Initial visibility marker; set for openings and spaces.
    pub hidden: bool,
}

/// Immutable product table with lookup by label.
#[derive(Debug, Clone, Default)]
pub struct ProductTable {
    products: Vec<Product>,
    by_label: FxHashMap<i32, usize>,
}

impl ProductTable {
    /// Read `count` product records in file order.
    pub fn read(cursor: &mut ByteCursor, count: u32) -> Result<Self> {
        let mut products = Vec::with_capacity(count as usize);
        let mut by_label = FxHashMap::with_capacity_and_hasher(count as usize, Default::default());

        for i in 0..count {
            let label = cursor.read_i32()?;
            let type_id = cursor.read_i16()?;
            let mut bbox = BoundingBox::read(cursor)?;
            bbox.swap_yz();
            by_label.entry(label).or_insert(products.len());
            products.push(Product {
                label,
                type_id,
                bbox,
                render_id: i + 1,
                hidden: is_opening_or_space(type_id),
            });
        }

        Ok(Self { products, by_label })
    }

    #[inline]
    pub fn get(&self, label: i32) -> Option<&Product> {
        self.by_label.get(&label).map(|&i| &self.products[i])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }
}

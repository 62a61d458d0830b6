// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Style palette.
//!
//! Styles arrive as `(id, rgba)` records and are kept in a dense palette
//! indexed by parse order, with a sparse map from the external style id to
//! the palette index. Two sentinel entries are always appended: id `-1`, the
//! fallback for style ids absent from the file, and id `-2`, the forced
//! style for opening and space products. Lookup by id is total.

use crate::cursor::ByteCursor;
use crate::error::Result;
use rustc_hash::FxHashMap;

/// Sentinel id resolving any unknown style.
pub const UNKNOWN_STYLE: i32 = -1;

/// Sentinel id forced onto opening and space products.
pub const OPENING_STYLE: i32 = -2;

/// Alpha below this renders as transparent (254/255).
pub const TRANSPARENCY_CUTOFF: f32 = 254.0 / 255.0;

/// Material descriptor: RGBA in [0, 1] plus derived transparency.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// External style id from the file (or a sentinel).
    pub id: i32,
    /// Dense palette index, sequential in parse order.
    pub index: usize,
    pub rgba: [f32; 4],
}

impl Style {
    #[inline]
    pub fn transparent(&self) -> bool {
        self.rgba[3] < TRANSPARENCY_CUTOFF
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.rgba[3]
    }
}

/// Indexed palette of styles with total lookup by external id.
#[derive(Debug, Clone)]
pub struct StylePalette {
    styles: Vec<Style>,
    by_id: FxHashMap<i32, usize>,
}

impl StylePalette {
    /// Read `count` style records and append the sentinel entries.
    pub fn read(cursor: &mut ByteCursor, count: u32) -> Result<Self> {
        let mut styles = Vec::with_capacity(count as usize + 2);
        let mut by_id =
            FxHashMap::with_capacity_and_hasher(count as usize + 2, Default::default());

        for _ in 0..count {
            let id = cursor.read_i32()?;
            let c = cursor.read_f32_array(4)?;
            let index = styles.len();
            by_id.entry(id).or_insert(index);
            styles.push(Style {
                id,
                index,
                rgba: [c[0], c[1], c[2], c[3]],
            });
        }

        let mut palette = Self { styles, by_id };
        palette.push_sentinel(UNKNOWN_STYLE, [0.47, 0.47, 0.47, 1.0]);
        palette.push_sentinel(OPENING_STYLE, [0.55, 0.55, 0.55, 0.25]);
        Ok(palette)
    }

    fn push_sentinel(&mut self, id: i32, rgba: [f32; 4]) {
        let index = self.styles.len();
        self.by_id.insert(id, index);
        self.styles.push(Style { id, index, rgba });
    }

    /// Palette index for an id; unknown ids map to the `-1` sentinel.
    #[inline]
    pub fn index_of(&self, id: i32) -> usize {
        match self.by_id.get(&id) {
            Some(&index) => index,
            None => self.by_id[&UNKNOWN_STYLE],
        }
    }

    /// Style for an id; total, falling back to the `-1` sentinel.
    #[inline]
    pub fn lookup(&self, id: i32) -> &Style {
        &self.styles[self.index_of(id)]
    }

    /// Whether the file (or a sentinel) defined this id.
    #[inline]
    pub fn contains(&self, id: i32) -> bool {
        self.by_id.contains_key(&id)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Style> {
        self.styles.get(index)
    }

    /// Number of entries including the two sentinels.
    #[inline]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.styles.iter()
    }
}

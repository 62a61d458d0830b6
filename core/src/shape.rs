// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape-instance records.
//!
//! Each geometry block opens with a repetition count followed by that many
//! instance records. A repetition of 1 means the single instance is baked
//! into the geometry and no transform is stored; two or more instances each
//! carry a 4×4 transform (f32 elements in version 1, f64 from version 2).
//!
//! The effective style is resolved here: opening/space products are forced
//! to the `-2` sentinel, unknown style ids fall back to `-1`.

use crate::axes;
use crate::cursor::ByteCursor;
use crate::error::{BlockIssue, Result};
use crate::product::{self, ProductTable};
use crate::style::{StylePalette, OPENING_STYLE, UNKNOWN_STYLE};
use nalgebra::Matrix4;

/// One appearance of a product in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeInstance {
    pub product_label: i32,
    pub instance_type: i16,
    pub instance_label: i32,
    /// Resolved style id (file id or a sentinel).
    pub style_id: i32,
    /// Dense palette index of the resolved style.
    pub style_index: usize,
    pub transparent: bool,
    pub opacity: f32,
    /// Remapped transform; `None` when the file stored none (repetition 1).
    pub transform: Option<Matrix4<f64>>,
}

/// Read one block's repetition count and instance records.
///
/// Shapes referencing unknown product labels are kept with a zeroed product
/// type; the reference is reported through `issues`.
pub fn read_shapes(
    cursor: &mut ByteCursor,
    version: u8,
    products: &ProductTable,
    styles: &StylePalette,
    issues: &mut Vec<BlockIssue>,
) -> Result<Vec<ShapeInstance>> {
    let repetition = cursor.read_count("shape repetition")?;
    let mut shapes = Vec::with_capacity(repetition as usize);

    for _ in 0..repetition {
        let product_label = cursor.read_i32()?;
        let instance_type = cursor.read_i16()?;
        let instance_label = cursor.read_i32()?;
        let file_style_id = cursor.read_i32()?;

        let transform = if repetition > 1 {
            Some(read_transform(cursor, version)?)
        } else {
            None
        };

        let product_type = match products.get(product_label) {
            Some(p) => p.type_id,
            None => {
                tracing::warn!(product_label, "shape references unknown product");
                issues.push(BlockIssue::UnknownProduct {
                    label: product_label,
                });
                0
            }
        };

        let style_id = if product::is_opening_or_space(product_type) {
            OPENING_STYLE
        } else if styles.contains(file_style_id) {
            file_style_id
        } else {
            UNKNOWN_STYLE
        };
        let style = styles.lookup(style_id);

        shapes.push(ShapeInstance {
            product_label,
            instance_type,
            instance_label,
            style_id,
            style_index: style.index,
            transparent: style.transparent(),
            opacity: style.opacity(),
            transform,
        });
    }

    Ok(shapes)
}

/// Read 16 column-major matrix elements and remap the matrix into Y-up.
fn read_transform(cursor: &mut ByteCursor, version: u8) -> Result<Matrix4<f64>> {
    let elements: Vec<f64> = if version < 2 {
        cursor.read_f32_array(16)?.iter().map(|&v| v as f64).collect()
    } else {
        cursor.read_f64_array(16)?
    };
    let mut matrix = Matrix4::from_column_slice(&elements);
    axes::swap_yz_matrix(&mut matrix);
    Ok(matrix)
}

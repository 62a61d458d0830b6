// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! WexBIM file header.
//!
//! The header fully determines subsequent section counts: a magic sentinel,
//! a version byte, six section counts, the meter scale, an optional
//! double-precision world origin (version > 3) and the region count.

use crate::cursor::ByteCursor;
use crate::error::{Error, Result};

/// Magic sentinel at the start of every WexBIM stream.
pub const MAGIC: i32 = 94_132_117;

/// Highest version this decoder understands.
pub const MAX_VERSION: u8 = 4;

/// Double-precision model origin, present in version 4 files.
///
/// Georeferenced models sit far from the origin; the producer subtracts this
/// offset so vertex data stays in f32 range and hands the remainder to the
/// consumer for placement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldOrigin {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorldOrigin {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Check if the origin is zero (no offset stored)
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Check if the offset is significant (>10km from origin)
    #[inline]
    pub fn is_significant(&self) -> bool {
        const THRESHOLD: f64 = 10_000.0;
        self.x.abs() > THRESHOLD || self.y.abs() > THRESHOLD || self.z.abs() > THRESHOLD
    }
}

/// Fixed-layout file header.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    pub version: u8,
    pub shape_count: u32,
    pub vertex_count: u32,
    pub triangle_count: u32,
    pub matrix_count: u32,
    pub product_count: u32,
    pub style_count: u32,
    /// Model units per meter.
    pub meter: f32,
    pub world_origin: WorldOrigin,
    pub region_count: u16,
}

impl Header {
    /// Parse the header, validating magic and version.
    pub fn read(cursor: &mut ByteCursor) -> Result<Self> {
        let magic = cursor.read_i32()?;
        if magic != MAGIC {
            return Err(Error::BadMagic {
                found: magic,
                expected: MAGIC,
            });
        }

        let version = cursor.read_u8()?;
        if version == 0 || version > MAX_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }

        let shape_count = cursor.read_count("shape")?;
        let vertex_count = cursor.read_count("vertex")?;
        let triangle_count = cursor.read_count("triangle")?;
        let matrix_count = cursor.read_count("matrix")?;
        let product_count = cursor.read_count("product")?;
        let style_count = cursor.read_count("style")?;
        let meter = cursor.read_f32()?;

        let world_origin = if version > 3 {
            let origin = cursor.read_f64_array(3)?;
            WorldOrigin::new(origin[0], origin[1], origin[2])
        } else {
            WorldOrigin::default()
        };

        let region_count = cursor.read_i16()?;
        if region_count < 0 {
            return Err(Error::InvalidCount {
                what: "region",
                value: region_count as i64,
            });
        }

        tracing::debug!(
            version,
            shape_count,
            vertex_count,
            triangle_count,
            product_count,
            style_count,
            region_count,
            "parsed wexbim header"
        );

        Ok(Self {
            version,
            shape_count,
            vertex_count,
            triangle_count,
            matrix_count,
            product_count,
            style_count,
            meter,
            world_origin,
            region_count: region_count as u16,
        })
    }
}

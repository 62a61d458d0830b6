// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding boxes.
//!
//! Regions, products and decoded meshes all carry a box stored in the file
//! as six f32 values (min then max). Boxes the API exposes are remapped into
//! the consumer's Y-up system on read.

use crate::axes;
use crate::cursor::ByteCursor;
use crate::error::Result;
use nalgebra::{Point3, Vector3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl BoundingBox {
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// Box collapsed to the origin, used when no record exists.
    pub fn zero() -> Self {
        Self {
            min: Point3::origin(),
            max: Point3::origin(),
        }
    }

    /// Read six consecutive f32 values (min x,y,z then max x,y,z).
    pub fn read(cursor: &mut ByteCursor) -> Result<Self> {
        let v = cursor.read_f32_array(6)?;
        Ok(Self {
            min: Point3::new(v[0], v[1], v[2]),
            max: Point3::new(v[3], v[4], v[5]),
        })
    }

    /// Remap both corners componentwise into Y-up.
    #[inline]
    pub fn swap_yz(&mut self) {
        self.min = axes::swap_yz_point(self.min);
        self.max = axes::swap_yz_point(self.max);
    }

    /// Whether min ≤ max componentwise.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    #[inline]
    pub fn centre(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    #[inline]
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Grow to include a point.
    #[inline]
    pub fn expand(&mut self, p: Point3<f32>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Smallest box containing both operands.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let mut out = *self;
        out.expand(other.min);
        out.expand(other.max);
        out
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

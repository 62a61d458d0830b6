// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial regions.
//!
//! A region is a spatial partition of the model with a population count and
//! a bounding volume. For version ≥ 3 files each region also owns a list of
//! geometry blocks; the region list defines the outer iteration of the
//! decode. Centres and bounds are remapped into Y-up on read.

use crate::axes;
use crate::bounds::BoundingBox;
use crate::cursor::ByteCursor;
use crate::error::Result;
use nalgebra::Point3;

/// Spatial partition of the model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    /// Number of shape instances inside the region.
    pub population: i32,
    pub centre: Point3<f32>,
    pub bbox: BoundingBox,
}

impl Region {
    pub fn read(cursor: &mut ByteCursor) -> Result<Self> {
        let population = cursor.read_i32()?;
        let c = cursor.read_f32_array(3)?;
        let centre = axes::swap_yz_point(Point3::new(c[0], c[1], c[2]));
        let mut bbox = BoundingBox::read(cursor)?;
        bbox.swap_yz();
        Ok(Self {
            population,
            centre,
            bbox,
        })
    }
}

/// Read the region list announced by the header.
pub fn read_regions(cursor: &mut ByteCursor, count: u16) -> Result<Vec<Region>> {
    let mut regions = Vec::with_capacity(count as usize);
    for _ in 0..count {
        regions.push(Region::read(cursor)?);
    }
    Ok(regions)
}

/// The region holding the most shape instances. Viewers use it to frame the
/// camera on the densest part of the model.
pub fn most_populated(regions: &[Region]) -> Option<&Region> {
    regions.iter().max_by_key(|r| r.population)
}

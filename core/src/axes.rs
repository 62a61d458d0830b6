// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed Z-up to Y-up axis remap.
//!
//! WexBIM producers write Z-up coordinates; renderers consume Y-up. The
//! remap is the orthonormal swap of the Y and Z axes, a permutation matrix
//! `T` with `T = Tᵀ = T⁻¹`, applied uniformly to positions, normals, bounds
//! and transform matrices so that viewers and pickers agree on one
//! coordinate system. Applying any remap twice is the identity.

use nalgebra::{Matrix4, Point3, Vector3};

/// Remap a position: `(x, y, z) → (x, z, y)`.
#[inline]
pub fn swap_yz_point(p: Point3<f32>) -> Point3<f32> {
    Point3::new(p.x, p.z, p.y)
}

/// Remap a direction vector: `(x, y, z) → (x, z, y)`.
#[inline]
pub fn swap_yz_vector(v: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(v.x, v.z, v.y)
}

/// Remap a 4×4 transform in place: `M → T·M·T`.
///
/// With `T` the Y/Z permutation the product collapses to swapping rows 1↔2
/// and columns 1↔2, so no matrix multiplication is needed.
#[inline]
pub fn swap_yz_matrix(m: &mut Matrix4<f64>) {
    m.swap_rows(1, 2);
    m.swap_columns(1, 2);
}

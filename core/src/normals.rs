// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Two-byte packed unit-normal decode.
//!
//! Face records store normals as a `(u, v)` byte pair: both components are
//! mapped to `[-1, 1]` and the third is reconstructed from the unit-length
//! constraint. The decoded vector is emitted in the consumer's Y-up system
//! with the producer's forward axis flipped, so `(128, 128)` — straight up
//! in the producer's Z-up world — comes out as ≈ `(0, 1, 0)`.

use crate::axes;
use nalgebra::Vector3;

/// Decode a packed `(u, v)` byte pair into a unit normal in consumer space.
#[inline]
pub fn decode_normal(u: u8, v: u8) -> Vector3<f32> {
    let un = 2.0 * f32::from(u) / 255.0 - 1.0;
    let vn = 2.0 * f32::from(v) / 255.0 - 1.0;
    let z = (1.0 - un * un - vn * vn).max(0.0).sqrt();
    let n = Vector3::new(un, vn, z).normalize();
    // Handedness flip between the producer's forward convention and the
    // consumer's, expressed on the component the axis swap sends to depth.
    axes::swap_yz_vector(Vector3::new(n.x, -n.y, n.z))
}

/// Encode a producer-space unit vector with `z ≥ 0` into a `(u, v)` pair.
///
/// Inverse of the hemisphere reconstruction in [`decode_normal`] before the
/// handedness flip and axis swap; used by synthetic-file writers and the
/// round-trip tests.
#[inline]
pub fn encode_normal(n: Vector3<f32>) -> (u8, u8) {
    let quantize = |c: f32| ((c + 1.0) * 255.0 / 2.0).round().clamp(0.0, 255.0) as u8;
    (quantize(n.x), quantize(n.y))
}

/// Invert the handedness flip and axis swap on a decoded normal, recovering
/// the producer-space vector.
#[inline]
pub fn to_producer_space(n: Vector3<f32>) -> Vector3<f32> {
    let unswapped = axes::swap_yz_vector(n);
    Vector3::new(unswapped.x, -unswapped.y, unswapped.z)
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for scene assembly
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling a scene
#[derive(Error, Debug)]
pub enum Error {
    #[error("Decode error: {0}")]
    DecodeError(#[from] wexbim_lite_core::Error),
}

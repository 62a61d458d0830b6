// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and block-level diagnostics.
//!
//! Structural errors (bad magic, unsupported version, truncated stream,
//! impossible counts) abort the decode. Damage confined to a single geometry
//! block is demoted to a [`Diagnostic`] and the decode continues, so one
//! broken product does not lose the whole model.

use thiserror::Error;

/// Result type for decode operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a WexBIM stream
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("bad magic number {found} (expected {expected})")]
    BadMagic { found: i32, expected: i32 },

    #[error("unsupported wexbim version {0}")]
    UnsupportedVersion(u8),

    #[error("unexpected end of stream at byte {offset} ({needed} more bytes needed)")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("invalid {what} count {value}")]
    InvalidCount { what: &'static str, value: i64 },

    #[error("vertex index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: u32 },

    #[error("wrote {written} triangle indices, declared {expected}")]
    CountMismatch { written: usize, expected: usize },
}

/// An issue found while decoding a single geometry block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockIssue {
    /// The block could not be decoded and was dropped from the output.
    Corrupt(Error),
    /// The block's length-prefixed region was not fully consumed.
    /// The block is kept; the unread tail is treated as local corruption.
    TrailingBytes { unread: usize },
    /// A shape referenced a product label with no record. The shape is kept
    /// with a zeroed product type and bounding box.
    UnknownProduct { label: i32 },
}

/// A block-scoped diagnostic collected during decode and returned alongside
/// the output.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Index of the region the block belongs to (file order).
    pub region: usize,
    /// Running block index across the whole file (file order).
    pub block: usize,
    pub issue: BlockIssue,
}

impl Diagnostic {
    /// Whether the affected block was dropped from the output.
    #[inline]
    pub fn dropped_block(&self) -> bool {
        matches!(self.issue, BlockIssue::Corrupt(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_drops_block() {
        let diag = Diagnostic {
            region: 0,
            block: 3,
            issue: BlockIssue::Corrupt(Error::IndexOutOfRange {
                index: 12,
                vertex_count: 4,
            }),
        };
        assert!(diag.dropped_block());

        let diag = Diagnostic {
            region: 0,
            block: 3,
            issue: BlockIssue::TrailingBytes { unread: 2 },
        };
        assert!(!diag.dropped_block());
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Little-endian byte cursor over an immutable buffer.
//!
//! All WexBIM fields are little-endian with no alignment or padding. Every
//! read advances the cursor by the exact natural width of the value; reads
//! past the end fail with [`Error::UnexpectedEof`]. Length-prefixed sections
//! are carved off with [`ByteCursor::sub_cursor`], which hands out an
//! independent bounded cursor and advances the parent past the section.

use crate::error::{Error, Result};

/// Cursor over a byte slice with typed little-endian readers.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Borrow the next `count` bytes without copying.
    #[inline]
    pub fn take_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(Error::UnexpectedEof {
                offset: self.pos,
                needed: count - self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    /// Carve an independent cursor over the next `len` bytes and advance
    /// past them. The caller is expected to check `is_at_end` on the
    /// sub-cursor once its section is parsed.
    pub fn sub_cursor(&mut self, len: usize) -> Result<ByteCursor<'a>> {
        Ok(ByteCursor::new(self.take_bytes(len)?))
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_bytes(1)?[0])
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        let b = self.take_bytes(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        let b = self.take_bytes(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        let b = self.take_bytes(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let b = self.take_bytes(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        let b = self.take_bytes(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    #[inline]
    pub fn read_f64(&mut self) -> Result<f64> {
        let b = self.take_bytes(8)?;
        Ok(f64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    /// Read an i32 section count, rejecting negative values.
    pub fn read_count(&mut self, what: &'static str) -> Result<u32> {
        let value = self.read_i32()?;
        if value < 0 {
            return Err(Error::InvalidCount {
                what,
                value: value as i64,
            });
        }
        Ok(value as u32)
    }

    /// Read `count` consecutive f32 values.
    pub fn read_f32_array(&mut self, count: usize) -> Result<Vec<f32>> {
        let bytes = self.take_bytes(count * 4)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect())
    }

    /// Read `count` consecutive f64 values.
    pub fn read_f64_array(&mut self, count: usize) -> Result<Vec<f64>> {
        let bytes = self.take_bytes(count * 8)?;
        Ok(bytes
            .chunks_exact(8)
            .map(|b| f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
            .collect())
    }
}

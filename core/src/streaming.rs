// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Streaming block iteration.
//!
//! The decode is a single strict pass:
//! `Start → Header → Regions → Styles → Products → (per region: blocks) → Done`.
//! [`BlockStream`] parses the prelude eagerly and then yields one event per
//! geometry block, so an interactive host can pump blocks at its own pace.
//! Suspension points are only ever between whole blocks, resuming never
//! re-reads consumed bytes, and the output order is file order regardless of
//! batch size. Dropping the stream mid-way discards intermediate buffers and
//! nothing else.
//!
//! Damage confined to one block's length-prefixed geometry section is
//! recorded as a diagnostic and the block is dropped; the stream continues
//! with the next block. Structural errors end the iteration with an `Err`.

use crate::cursor::ByteCursor;
use crate::error::{BlockIssue, Diagnostic, Result};
use crate::geometry::read_geometry;
use crate::header::Header;
use crate::model::{GeometryBlock, Model};
use crate::product::ProductTable;
use crate::region::{read_regions, Region};
use crate::shape::read_shapes;
use crate::style::StylePalette;

/// Streaming configuration.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Number of blocks decoded between `Progress` events. Zero disables
    /// progress reporting.
    pub batch_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { batch_size: 32 }
    }
}

/// Events produced while pumping a [`BlockStream`].
#[derive(Debug)]
pub enum BlockEvent {
    /// One geometry block decoded to a mesh with its shape instances.
    Block(GeometryBlock),
    /// Periodic progress marker, emitted between blocks.
    Progress {
        bytes_consumed: usize,
        bytes_total: usize,
    },
    /// Terminal event: the cursor reached the end of the block sections.
    /// Trailing bytes after the final region are logged but non-fatal.
    Completed { trailing_bytes: usize },
}

/// Single-pass streaming decoder over a WexBIM byte buffer.
pub struct BlockStream<'a> {
    cursor: ByteCursor<'a>,
    config: StreamConfig,
    header: Header,
    regions: Vec<Region>,
    styles: StylePalette,
    products: ProductTable,
    diagnostics: Vec<Diagnostic>,
    /// Region owning the blocks currently being decoded.
    current_region: usize,
    /// Next region whose block count has not been read yet.
    next_region: usize,
    /// Blocks remaining in the current region (version ≥ 3).
    blocks_left: u32,
    /// Running block index across the file.
    block_index: usize,
    since_progress: usize,
    finished: bool,
}

impl<'a> BlockStream<'a> {
    /// Parse the header and the region/style/product tables, leaving the
    /// cursor at the first geometry block.
    pub fn new(bytes: &'a [u8], config: StreamConfig) -> Result<Self> {
        let mut cursor = ByteCursor::new(bytes);
        let header = Header::read(&mut cursor)?;
        let regions = read_regions(&mut cursor, header.region_count)?;
        let styles = StylePalette::read(&mut cursor, header.style_count)?;
        let products = ProductTable::read(&mut cursor, header.product_count)?;

        Ok(Self {
            cursor,
            config,
            header,
            regions,
            styles,
            products,
            diagnostics: Vec::new(),
            current_region: 0,
            next_region: 0,
            blocks_left: 0,
            block_index: 0,
            since_progress: 0,
            finished: false,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn styles(&self) -> &StylePalette {
        &self.styles
    }

    pub fn products(&self) -> &ProductTable {
        &self.products
    }

    /// Diagnostics accumulated so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the stream into a [`Model`] holding the given blocks.
    pub fn into_model(self, blocks: Vec<GeometryBlock>) -> Model {
        Model {
            header: self.header,
            regions: self.regions,
            styles: self.styles,
            products: self.products,
            blocks,
            diagnostics: self.diagnostics,
        }
    }

    /// Advance region bookkeeping; true while blocks remain.
    fn has_more_blocks(&mut self) -> Result<bool> {
        if self.header.version >= 3 {
            while self.blocks_left == 0 {
                if self.next_region >= self.regions.len() {
                    return Ok(false);
                }
                self.current_region = self.next_region;
                self.next_region += 1;
                self.blocks_left = self.cursor.read_count("geometry block")?;
            }
            Ok(true)
        } else {
            // Versions 1 and 2 carry no per-region block counts: the rest
            // of the stream is one implicit block list.
            Ok(!self.cursor.is_at_end())
        }
    }

    /// Decode the next block; `None` means it was dropped as corrupt.
    fn decode_block(&mut self) -> Result<Option<GeometryBlock>> {
        let region = self.current_region;
        let block = self.block_index;
        self.block_index += 1;
        self.since_progress += 1;
        if self.header.version >= 3 {
            self.blocks_left -= 1;
        }

        let mut issues = Vec::new();
        let shapes = read_shapes(
            &mut self.cursor,
            self.header.version,
            &self.products,
            &self.styles,
            &mut issues,
        )?;
        for issue in issues {
            self.diagnostics.push(Diagnostic {
                region,
                block,
                issue,
            });
        }

        let mesh = if self.header.version >= 3 {
            let length = self.cursor.read_count("geometry length")? as usize;
            let mut sub = self.cursor.sub_cursor(length)?;
            match read_geometry(&mut sub) {
                Ok(mesh) => {
                    if !sub.is_at_end() {
                        tracing::warn!(
                            block,
                            unread = sub.remaining(),
                            "geometry section not fully consumed"
                        );
                        self.diagnostics.push(Diagnostic {
                            region,
                            block,
                            issue: BlockIssue::TrailingBytes {
                                unread: sub.remaining(),
                            },
                        });
                    }
                    Some(mesh)
                }
                Err(err) => {
                    tracing::warn!(block, %err, "dropping corrupt geometry block");
                    self.diagnostics.push(Diagnostic {
                        region,
                        block,
                        issue: BlockIssue::Corrupt(err),
                    });
                    None
                }
            }
        } else {
            // No declared length to skip to in older files, so damage here
            // is not recoverable.
            Some(read_geometry(&mut self.cursor)?)
        };

        Ok(mesh.map(|mesh| GeometryBlock {
            region,
            shapes,
            mesh,
        }))
    }

    fn next_event(&mut self) -> Result<BlockEvent> {
        loop {
            if self.config.batch_size > 0 && self.since_progress >= self.config.batch_size {
                self.since_progress = 0;
                return Ok(BlockEvent::Progress {
                    bytes_consumed: self.cursor.position(),
                    bytes_total: self.cursor.len(),
                });
            }

            if !self.has_more_blocks()? {
                self.finished = true;
                let trailing_bytes = self.cursor.remaining();
                if trailing_bytes > 0 {
                    tracing::warn!(trailing_bytes, "trailing bytes after final region");
                }
                return Ok(BlockEvent::Completed { trailing_bytes });
            }

            if let Some(block) = self.decode_block()? {
                return Ok(BlockEvent::Block(block));
            }
        }
    }
}

impl<'a> Iterator for BlockStream<'a> {
    type Item = Result<BlockEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_event() {
            Ok(event) => Some(Ok(event)),
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

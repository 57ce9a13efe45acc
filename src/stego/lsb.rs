// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Bit-level embedding into and extraction from pixel LSBs.
//!
//! Cells are visited in flat row-major order (row, column, channel); bit `n`
//! of the stream goes to cell `n`. Embedding replaces bit 0 of a cell and keeps
//! the upper seven bits. Extraction must use the identical order, otherwise the
//! recovered stream is indistinguishable from noise.

use crate::grid::PixelGrid;
use crate::stego::capacity;
use crate::stego::error::CapacityError;
use crate::stego::frame::{read_length_prefix, LENGTH_PREFIX_BITS};

/// Cells per Rayon work item. Chunk boundaries line up with the flat index,
/// so the parallel path writes exactly what the serial one does.
#[cfg(feature = "parallel")]
const PARALLEL_CHUNK: usize = 64 * 1024;

/// Write `bits` into the LSBs of the first `bits.len()` cells.
///
/// Capacity is checked before the first write; on failure the grid is left
/// untouched. Cells past the end of `bits` are not modified.
///
/// # Errors
/// [`CapacityError::TooSmall`] if `bits.len()` exceeds the grid's cell count.
pub fn embed(grid: &mut PixelGrid, bits: &[u8]) -> Result<(), CapacityError> {
    capacity::check(bits.len(), grid)?;

    let cells = &mut grid.cells_mut()[..bits.len()];
    write_lsbs(cells, bits);

    tracing::trace!(bits = bits.len(), "LSBs written");
    Ok(())
}

/// Embed into a copy of `grid`, leaving the original as it was.
pub fn embed_copy(grid: &PixelGrid, bits: &[u8]) -> Result<PixelGrid, CapacityError> {
    capacity::check(bits.len(), grid)?;
    let mut stego = grid.clone();
    write_lsbs(&mut stego.cells_mut()[..bits.len()], bits);
    Ok(stego)
}

/// Read LSBs back in traversal order.
///
/// - `Some(n)`: read `n` bits, or every cell if the grid holds fewer.
/// - `None`: read the 32-bit length prefix, then as many payload bits as it
///   declares (capped at what the grid holds). The rest of the grid is not
///   visited.
pub fn extract(grid: &PixelGrid, bit_count: Option<usize>) -> Vec<u8> {
    let cells = grid.cells();
    let count = match bit_count {
        Some(n) => n,
        None => match read_length_prefix(&read_lsbs(&cells[..LENGTH_PREFIX_BITS.min(cells.len())])) {
            Some(declared) => LENGTH_PREFIX_BITS.saturating_add(declared as usize),
            None => LENGTH_PREFIX_BITS,
        },
    };

    let count = count.min(cells.len());
    tracing::trace!(requested = ?bit_count, reading = count, "extracting LSBs");
    read_lsbs(&cells[..count])
}

fn read_lsbs(cells: &[u8]) -> Vec<u8> {
    cells.iter().map(|&v| v & 1).collect()
}

fn write_lsbs_serial(cells: &mut [u8], bits: &[u8]) {
    for (cell, &bit) in cells.iter_mut().zip(bits) {
        *cell = (*cell & 0xFE) | (bit & 1);
    }
}

#[cfg(not(feature = "parallel"))]
fn write_lsbs(cells: &mut [u8], bits: &[u8]) {
    write_lsbs_serial(cells, bits);
}

#[cfg(feature = "parallel")]
fn write_lsbs(cells: &mut [u8], bits: &[u8]) {
    use rayon::prelude::*;

    cells
        .par_chunks_mut(PARALLEL_CHUNK)
        .zip(bits.par_chunks(PARALLEL_CHUNK))
        .for_each(|(c, b)| write_lsbs_serial(c, b));
}

/// Lazy iterator over cell LSBs in traversal order.
///
/// Used where the stream length is only known once a marker has been seen.
pub struct LsbReader<'a> {
    cells: core::slice::Iter<'a, u8>,
}

impl<'a> LsbReader<'a> {
    pub fn new(grid: &'a PixelGrid) -> Self {
        Self { cells: grid.cells().iter() }
    }
}

impl Iterator for LsbReader<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.cells.next().map(|&v| v & 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

impl ExactSizeIterator for LsbReader<'_> {}

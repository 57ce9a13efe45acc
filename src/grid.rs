// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Decoded pixel storage.
//!
//! Provides [`PixelGrid`], a `height × width × channels` array of 8-bit channel
//! values in row-major order. Loading and saving image files is left to the
//! caller; the grid is what the codec reads from and writes into.

use crate::stego::error::StegoError;

/// Channel count of a decoded colour image (B, G, R).
pub const DEFAULT_CHANNELS: usize = 3;

/// Grid of 8-bit channel values for one decoded image.
///
/// Cells are stored row-major: row, then column, then channel. The flat index
/// of cell `(i, j, k)` is `i * width * channels + j * channels + k`, which is
/// also the order the LSB codec visits cells in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    height: usize,
    width: usize,
    channels: usize,
    /// Flat storage: height * width * channels values.
    cells: Vec<u8>,
}

impl PixelGrid {
    /// Create a new grid initialized to zero.
    pub fn new(height: usize, width: usize, channels: usize) -> Self {
        Self {
            height,
            width,
            channels,
            cells: vec![0u8; height * width * channels],
        }
    }

    /// Create a zeroed three-channel grid.
    pub fn bgr(height: usize, width: usize) -> Self {
        Self::new(height, width, DEFAULT_CHANNELS)
    }

    /// Wrap an existing buffer of decoded channel values.
    ///
    /// # Errors
    /// [`StegoError::InvalidGrid`] if `cells.len()` is not
    /// `height * width * channels`.
    pub fn from_raw(
        height: usize,
        width: usize,
        channels: usize,
        cells: Vec<u8>,
    ) -> Result<Self, StegoError> {
        let expected = height
            .checked_mul(width)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(StegoError::InvalidGrid { expected: usize::MAX, actual: cells.len() })?;
        if cells.len() != expected {
            return Err(StegoError::InvalidGrid { expected, actual: cells.len() });
        }
        Ok(Self { height, width, channels, cells })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Total number of channel cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a channel value.
    /// - `i`, `j`: pixel row and column (0-based)
    /// - `k`: channel within the pixel
    pub fn get(&self, i: usize, j: usize, k: usize) -> u8 {
        self.cells[self.index(i, j, k)]
    }

    /// Set a channel value.
    pub fn set(&mut self, i: usize, j: usize, k: usize, val: u8) {
        let idx = self.index(i, j, k);
        self.cells[idx] = val;
    }

    /// Raw read-only access to all cells in traversal order.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Raw mutable access to all cells in traversal order.
    ///
    /// Used by the LSB writer (and by Rayon `par_chunks_mut` when the
    /// `parallel` feature is enabled).
    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Hand the flat buffer back to the caller for encoding.
    pub fn into_raw(self) -> Vec<u8> {
        self.cells
    }

    fn index(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert!(i < self.height, "row {i} >= {}", self.height);
        debug_assert!(j < self.width, "column {j} >= {}", self.width);
        debug_assert!(k < self.channels, "channel {k} >= {}", self.channels);
        i * self.width * self.channels + j * self.channels + k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_get_set() {
        let mut grid = PixelGrid::bgr(3, 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.channels(), 3);
        assert_eq!(grid.len(), 18);

        assert_eq!(grid.get(0, 0, 0), 0);
        assert_eq!(grid.get(2, 1, 2), 0);

        grid.set(1, 0, 2, 200);
        assert_eq!(grid.get(1, 0, 2), 200);
    }

    #[test]
    fn flat_layout_is_row_column_channel() {
        let mut grid = PixelGrid::new(2, 3, 3);
        grid.set(1, 2, 1, 7);
        // 1*3*3 + 2*3 + 1 = 16
        assert_eq!(grid.cells()[16], 7);
        assert_eq!(grid.cells().iter().filter(|&&v| v != 0).count(), 1);
    }

    #[test]
    fn from_raw_checks_length() {
        assert!(PixelGrid::from_raw(2, 2, 3, vec![0; 12]).is_ok());
        match PixelGrid::from_raw(2, 2, 3, vec![0; 11]) {
            Err(StegoError::InvalidGrid { expected: 12, actual: 11 }) => {}
            other => panic!("expected InvalidGrid, got {other:?}"),
        }
    }

    #[test]
    fn into_raw_returns_buffer() {
        let data: Vec<u8> = (0..12).collect();
        let grid = PixelGrid::from_raw(1, 4, 3, data.clone()).unwrap();
        assert_eq!(grid.into_raw(), data);
    }
}

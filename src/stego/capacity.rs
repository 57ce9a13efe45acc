// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Capacity planning.
//!
//! Every channel cell carries one bit, so a grid holds
//! `height × width × channels` bits. The check here runs before any pixel is
//! written; embedding is all-or-nothing.

use crate::config::StegoConfig;
use crate::grid::PixelGrid;
use crate::stego::error::CapacityError;

/// Number of bits the grid can carry.
pub fn capacity_bits(grid: &PixelGrid) -> usize {
    grid.height() * grid.width() * grid.channels()
}

/// Fail if `required_bits` does not fit into `grid`.
///
/// # Errors
/// [`CapacityError::TooSmall`] if `required_bits > capacity_bits(grid)`.
pub fn check(required_bits: usize, grid: &PixelGrid) -> Result<(), CapacityError> {
    let available = capacity_bits(grid);
    if required_bits > available {
        return Err(CapacityError::TooSmall { required: required_bits, available });
    }
    Ok(())
}

/// Exact number of bits `hide` needs for a message of `message_len` bytes.
pub fn framed_bit_length(message_len: usize, config: &StegoConfig) -> usize {
    config.framing.framed_bit_length(config.cipher.blob_len(message_len))
}

/// Estimate the maximum message size (in bytes) that fits into `grid`.
///
/// The result is exact for the given configuration: a message of the returned
/// length fits, one byte more does not. Returns 0 when not even an empty
/// message fits; check [`framed_bit_length`] for a zero-length message to tell
/// the two apart.
pub fn estimate_capacity(grid: &PixelGrid, config: &StegoConfig) -> usize {
    config
        .framing
        .max_blob_len(capacity_bits(grid))
        .and_then(|blob_budget| config.cipher.max_plaintext_len(blob_budget))
        .unwrap_or(0)
}

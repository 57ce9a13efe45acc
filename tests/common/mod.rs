// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Shared helpers for the integration tests.

#![allow(dead_code)]

use phasm_lsb::PixelGrid;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Three-channel cover grid filled with seeded noise, so LSBs start out mixed.
pub fn noise_grid(height: usize, width: usize, seed: u64) -> PixelGrid {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut cells = vec![0u8; height * width * 3];
    rng.fill_bytes(&mut cells);
    PixelGrid::from_raw(height, width, 3, cells).unwrap()
}

/// Cells that differ between two equally sized grids, as (flat index, before, after).
pub fn changed_cells(before: &PixelGrid, after: &PixelGrid) -> Vec<(usize, u8, u8)> {
    before
        .cells()
        .iter()
        .zip(after.cells())
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, (&a, &b))| (i, a, b))
        .collect()
}

/// Route `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

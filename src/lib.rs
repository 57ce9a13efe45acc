// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # phasm-lsb
//!
//! Pure-Rust codec for hiding encrypted text messages in the least-significant
//! bits of decoded raster pixels.
//!
//! The message is encrypted with AES-256 under a SHA-256 hash of the
//! passphrase, framed with a 32-bit length prefix, and written one bit per
//! channel cell in row/column/channel order. Image decoding and encoding stay
//! with the caller: the codec only sees a [`PixelGrid`].
//!
//! The key derivation has no salt and no work factor. That is required for
//! compatibility with existing stego images, and it means weak passphrases can
//! be brute-forced offline.
//!
//! # Quick start
//!
//! ```rust
//! use phasm_lsb::{hide_text, reveal_text, PixelGrid};
//!
//! let mut grid = PixelGrid::bgr(64, 64);
//! hide_text(&mut grid, "secret message", "passphrase").unwrap();
//! assert_eq!(reveal_text(&grid, "passphrase").unwrap(), "secret message");
//! ```

pub mod config;
pub mod grid;
pub mod stego;

pub use config::{ConfigError, StegoConfig};
pub use grid::PixelGrid;
pub use stego::crypto::{derive_key, CipherSuite, DerivedKey};
pub use stego::frame::Framing;
pub use stego::{hide, hide_copy, hide_text, hide_with, reveal, reveal_text, reveal_with};
pub use stego::{capacity_bits, estimate_capacity, framed_bit_length};
pub use stego::{CapacityError, DecryptionError, FramingError, StegoError};

// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Steganographic hiding and revealing.
//!
//! The payload path is split into small stages, leaf-first:
//!
//! - [`crypto`]: SHA-256 key derivation and the payload ciphers
//!   (AES-256-CBC by default, AES-256-GCM-SIV on request).
//! - [`frame`]: turns the ciphertext blob into a self-describing bitstream
//!   (32-bit length prefix by default, legacy sentinel on request).
//! - [`capacity`]: how many bits a grid holds and whether a frame fits.
//! - [`lsb`]: writes/reads the bitstream into/from cell LSBs.
//! - `pipeline`: ties the stages together behind [`hide`] / [`reveal`].

pub mod capacity;
pub mod crypto;
pub mod error;
pub mod frame;
pub mod lsb;
mod pipeline;

pub use capacity::{capacity_bits, estimate_capacity, framed_bit_length};
pub use error::{CapacityError, DecryptionError, FramingError, StegoError};
pub use pipeline::{hide, hide_copy, hide_text, hide_with, reveal, reveal_text, reveal_with};

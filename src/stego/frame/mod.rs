// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Payload bitstream framing.
//!
//! The frame lets the extractor recover exactly the ciphertext blob from the
//! pixel LSBs. The canonical layout is length-prefixed:
//!
//! ```text
//! [32 bits ] blob length in bits (big-endian u32)
//! [L bits  ] blob, MSB first within each byte
//! ```
//!
//! Any byte pattern may appear in the blob, and extraction reads exactly
//! `32 + L` cells. The older sentinel layout (base64 text ended by a marker)
//! is still readable and writable through [`Framing::Sentinel`]; see
//! [`sentinel`].

pub mod sentinel;

use serde::{Deserialize, Serialize};

use crate::grid::PixelGrid;
use crate::stego::error::FramingError;
use crate::stego::lsb::{self, LsbReader};

/// Width of the length header in bits.
pub const LENGTH_PREFIX_BITS: usize = 32;

/// Bitstream layout selection.
///
/// This is the one place that decides how a blob becomes bits, how many bits
/// that costs, and how many cells to read back on extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framing {
    /// 32-bit big-endian bit count, then the blob.
    #[default]
    LengthPrefixed,
    /// base64(blob) followed by the `###END###` marker.
    Sentinel,
}

impl Framing {
    /// Render `blob` as a framed bit sequence.
    pub fn frame(self, blob: &[u8]) -> Result<Vec<u8>, FramingError> {
        match self {
            Self::LengthPrefixed => frame(blob),
            Self::Sentinel => Ok(sentinel::frame(blob)),
        }
    }

    /// Recover the blob from a framed bit sequence.
    pub fn unframe(self, bits: &[u8]) -> Result<Vec<u8>, FramingError> {
        match self {
            Self::LengthPrefixed => unframe(bits),
            Self::Sentinel => sentinel::unframe(bits),
        }
    }

    /// Number of bits [`Framing::frame`] produces for a blob of `blob_len` bytes.
    pub fn framed_bit_length(self, blob_len: usize) -> usize {
        match self {
            Self::LengthPrefixed => framed_bit_length(blob_len),
            Self::Sentinel => sentinel::framed_bit_length(blob_len),
        }
    }

    /// Largest blob (in bytes) whose frame fits in `capacity_bits`.
    pub fn max_blob_len(self, capacity_bits: usize) -> Option<usize> {
        match self {
            Self::LengthPrefixed => {
                let bytes = capacity_bits.checked_sub(LENGTH_PREFIX_BITS)? / 8;
                Some(bytes.min(u32::MAX as usize / 8))
            }
            Self::Sentinel => sentinel::max_blob_len(capacity_bits),
        }
    }

    /// Pull the blob out of a stego grid, reading only as many cells as the
    /// layout requires.
    pub fn extract_blob(self, grid: &PixelGrid) -> Result<Vec<u8>, FramingError> {
        match self {
            Self::LengthPrefixed => unframe(&lsb::extract(grid, None)),
            Self::Sentinel => sentinel::scan(LsbReader::new(grid)),
        }
    }
}

/// Build a length-prefixed bit sequence for `blob`.
///
/// # Errors
/// [`FramingError::Oversized`] if the blob's bit length exceeds `u32::MAX`.
pub fn frame(blob: &[u8]) -> Result<Vec<u8>, FramingError> {
    let bit_len = blob
        .len()
        .checked_mul(8)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(FramingError::Oversized(blob.len()))?;

    let mut bits = Vec::with_capacity(framed_bit_length(blob.len()));
    bits.extend(bytes_to_bits(&bit_len.to_be_bytes()));
    bits.extend(bytes_to_bits(blob));
    Ok(bits)
}

/// Parse a length-prefixed bit sequence back into the blob.
///
/// Bits beyond `32 + L` are ignored.
///
/// # Errors
/// - [`FramingError::Truncated`] if the header or the declared payload is cut short.
/// - [`FramingError::Unaligned`] if `L` is not a multiple of 8.
pub fn unframe(bits: &[u8]) -> Result<Vec<u8>, FramingError> {
    let declared = read_length_prefix(bits).ok_or(FramingError::Truncated {
        declared: LENGTH_PREFIX_BITS,
        available: bits.len(),
    })?;
    if declared % 8 != 0 {
        return Err(FramingError::Unaligned(declared));
    }

    let end = LENGTH_PREFIX_BITS.saturating_add(declared as usize);
    if bits.len() < end {
        return Err(FramingError::Truncated { declared: end, available: bits.len() });
    }
    Ok(bits_to_bytes(&bits[LENGTH_PREFIX_BITS..end]))
}

/// Decode the 32-bit length header, or `None` if fewer than 32 bits are given.
pub fn read_length_prefix(bits: &[u8]) -> Option<u32> {
    let header = bits.get(..LENGTH_PREFIX_BITS)?;
    Some(header.iter().fold(0u32, |acc, &bit| (acc << 1) | (bit & 1) as u32))
}

/// Bits needed to frame a blob of `blob_len` bytes.
pub fn framed_bit_length(blob_len: usize) -> usize {
    LENGTH_PREFIX_BITS + blob_len * 8
}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

/// Convert a bit vector (MSB first) back to bytes.
/// Pads the last byte with zero bits if `bits.len()` is not a multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity((bits.len() + 7) / 8);
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            byte |= (bit & 1) << (7 - i);
        }
        bytes.push(byte);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_unframe_roundtrip() {
        let blob: Vec<u8> = (0..48).collect();
        let bits = frame(&blob).unwrap();
        assert_eq!(bits.len(), 32 + 48 * 8);
        assert_eq!(unframe(&bits).unwrap(), blob);
    }

    #[test]
    fn header_is_big_endian_bit_count() {
        let bits = frame(&[0xFF; 3]).unwrap();
        // 24 bits = 0x00000018
        assert_eq!(bits_to_bytes(&bits[..32]), vec![0x00, 0x00, 0x00, 0x18]);
        assert_eq!(read_length_prefix(&bits), Some(24));
    }

    #[test]
    fn empty_blob_is_header_only() {
        let bits = frame(&[]).unwrap();
        assert_eq!(bits, vec![0u8; 32]);
        assert_eq!(unframe(&bits).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn trailing_bits_ignored() {
        let mut bits = frame(&[0xAB, 0xCD]).unwrap();
        bits.extend_from_slice(&[1, 1, 0, 1, 0, 1, 1, 1, 1]);
        assert_eq!(unframe(&bits).unwrap(), vec![0xAB, 0xCD]);
    }

    #[test]
    fn short_header_is_truncated() {
        assert_eq!(
            unframe(&[0u8; 31]),
            Err(FramingError::Truncated { declared: 32, available: 31 })
        );
        assert_eq!(unframe(&[]), Err(FramingError::Truncated { declared: 32, available: 0 }));
    }

    #[test]
    fn short_payload_is_truncated() {
        let bits = frame(&[1, 2, 3, 4]).unwrap();
        assert_eq!(
            unframe(&bits[..60]),
            Err(FramingError::Truncated { declared: 64, available: 60 })
        );
    }

    #[test]
    fn unaligned_length_rejected() {
        let mut bits = bytes_to_bits(&13u32.to_be_bytes());
        bits.extend_from_slice(&[0u8; 16]);
        assert_eq!(unframe(&bits), Err(FramingError::Unaligned(13)));
    }

    #[test]
    fn bytes_bits_roundtrip() {
        let original = vec![0xDE, 0xAD, 0xBE, 0xEF];
        let bits = bytes_to_bits(&original);
        assert_eq!(bits.len(), 32);
        assert_eq!(bits_to_bytes(&bits), original);
    }

    #[test]
    fn bits_to_bytes_partial_byte() {
        // 10110_000 = 0xB0
        assert_eq!(bits_to_bytes(&[1u8, 0, 1, 1, 0]), vec![0xB0]);
    }

    #[test]
    fn framing_dispatch_agrees_with_lengths() {
        let blob = [0x5Au8; 37];
        for framing in [Framing::LengthPrefixed, Framing::Sentinel] {
            let bits = framing.frame(&blob).unwrap();
            assert_eq!(bits.len(), framing.framed_bit_length(blob.len()), "{framing:?}");
            assert_eq!(framing.unframe(&bits).unwrap(), blob, "{framing:?}");
        }
    }

    #[test]
    fn max_blob_len_fits() {
        for framing in [Framing::LengthPrefixed, Framing::Sentinel] {
            for capacity in [0usize, 31, 32, 40, 100, 1000, 10_000] {
                if let Some(n) = framing.max_blob_len(capacity) {
                    assert!(framing.framed_bit_length(n) <= capacity, "{framing:?} {capacity}");
                    assert!(framing.framed_bit_length(n + 1) > capacity, "{framing:?} {capacity}");
                } else {
                    assert!(framing.framed_bit_length(0) > capacity, "{framing:?} {capacity}");
                }
            }
        }
    }
}

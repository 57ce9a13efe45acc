// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Sentinel-terminated framing (legacy layout).
//!
//! ```text
//! [base64(blob)] standard alphabet, '=' padded
//! [###END###   ] 9-byte ASCII end marker
//! ```
//!
//! There is no length header, so the reader scans until the marker shows up.
//! base64 never produces `#`, which is what keeps the marker from appearing
//! early inside the payload. The marker is matched on byte boundaries only.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::{bits_to_bytes, bytes_to_bits};
use crate::stego::error::FramingError;

/// End-of-payload marker.
pub const END_MARKER: &[u8] = b"###END###";

/// base64 text length for a blob of `blob_len` bytes.
fn encoded_len(blob_len: usize) -> usize {
    blob_len.div_ceil(3) * 4
}

/// Bits needed to frame a blob of `blob_len` bytes.
pub fn framed_bit_length(blob_len: usize) -> usize {
    (encoded_len(blob_len) + END_MARKER.len()) * 8
}

/// Largest blob (in bytes) whose frame fits in `capacity_bits`.
pub fn max_blob_len(capacity_bits: usize) -> Option<usize> {
    let text_budget = (capacity_bits / 8).checked_sub(END_MARKER.len())?;
    Some(text_budget / 4 * 3)
}

/// Render `blob` as base64 text plus marker, MSB first.
pub fn frame(blob: &[u8]) -> Vec<u8> {
    let mut text = STANDARD.encode(blob).into_bytes();
    text.extend_from_slice(END_MARKER);
    bytes_to_bits(&text)
}

/// Recover the blob from a sentinel-framed bit sequence.
pub fn unframe(bits: &[u8]) -> Result<Vec<u8>, FramingError> {
    scan(bits.iter().copied())
}

/// Consume bits until the end marker completes, then decode what came before.
///
/// Stops reading as soon as the marker is seen, so a grid-backed iterator
/// only visits the cells the payload occupies.
///
/// # Errors
/// - [`FramingError::MissingSentinel`] if the bits run out first.
/// - [`FramingError::InvalidEncoding`] if the text is not valid base64.
pub fn scan<I>(bits: I) -> Result<Vec<u8>, FramingError>
where
    I: IntoIterator<Item = u8>,
{
    let mut text = Vec::new();
    let mut pending = Vec::with_capacity(8);

    for bit in bits {
        pending.push(bit);
        if pending.len() < 8 {
            continue;
        }
        text.extend(bits_to_bytes(&pending));
        pending.clear();

        if text.ends_with(END_MARKER) {
            text.truncate(text.len() - END_MARKER.len());
            tracing::trace!(text_len = text.len(), "end marker found");
            return STANDARD.decode(&text).map_err(|_| FramingError::InvalidEncoding);
        }
    }

    Err(FramingError::MissingSentinel)
}

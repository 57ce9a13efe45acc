// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the steganography pipeline.
//!
//! Each stage has its own error so callers can match on exactly what failed:
//! [`CapacityError`] (planning), [`FramingError`] (bitstream layout) and
//! [`DecryptionError`] (cipher). [`StegoError`] wraps all of them for the
//! top-level `hide` / `reveal` calls.

use thiserror::Error;

/// The framed payload does not fit into the pixel grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapacityError {
    /// More bits are required than the grid has channel cells.
    #[error("image too small: payload needs {required} bits, grid holds {available}")]
    TooSmall { required: usize, available: usize },
}

/// The bitstream could not be framed or unframed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FramingError {
    /// Fewer bits are available than the header (or its declared length) needs.
    #[error("bitstream truncated: {declared} bits declared, {available} available")]
    Truncated { declared: usize, available: usize },
    /// The declared payload length is not a whole number of bytes.
    #[error("declared payload length of {0} bits is not byte aligned")]
    Unaligned(u32),
    /// The payload is too long for the 32-bit length header.
    #[error("payload of {0} bytes exceeds the length header range")]
    Oversized(usize),
    /// No end marker was found before the bitstream ran out.
    #[error("end marker not found in bitstream")]
    MissingSentinel,
    /// The text before the end marker is not valid base64.
    #[error("payload text is not valid base64")]
    InvalidEncoding,
}

/// The ciphertext blob could not be decrypted.
///
/// `BadPadding` and `AuthenticationFailed` carry no detail and read the same
/// whether the key or the data was wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecryptionError {
    /// The blob is too short or not aligned to the cipher's block size.
    #[error("malformed ciphertext ({len} bytes)")]
    Malformed { len: usize },
    /// CBC padding did not validate (wrong passphrase or corrupted data).
    #[error("decryption failed (wrong passphrase?)")]
    BadPadding,
    /// AEAD tag did not verify (wrong passphrase or corrupted data).
    #[error("authentication failed (wrong passphrase?)")]
    AuthenticationFailed,
}

/// Errors that can occur during hiding or revealing a message.
#[derive(Error, Debug)]
pub enum StegoError {
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    #[error(transparent)]
    Framing(#[from] FramingError),
    #[error(transparent)]
    Decryption(#[from] DecryptionError),
    /// A raw pixel buffer does not match the stated dimensions.
    #[error("pixel buffer holds {actual} cells, dimensions need {expected}")]
    InvalidGrid { expected: usize, actual: usize },
    /// The extracted plaintext is not valid UTF-8.
    #[error("extracted text is not valid UTF-8")]
    InvalidUtf8,
}

impl StegoError {
    /// `true` for the failures a wrong passphrase produces.
    pub fn is_decryption_failure(&self) -> bool {
        matches!(self, Self::Decryption(_))
    }
}

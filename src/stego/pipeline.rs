// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Hide/reveal pipeline.
//!
//! Hiding:
//! 1. Derive the key from the passphrase (SHA-256)
//! 2. Encrypt the message (fresh IV or nonce per call)
//! 3. Frame the blob into a bit sequence
//! 4. Check capacity, failing before any pixel is touched
//! 5. Write the bits into the cell LSBs
//!
//! Revealing runs the same steps backwards: extract and unframe the blob,
//! derive the key, decrypt.

use crate::config::StegoConfig;
use crate::grid::PixelGrid;
use crate::stego::capacity;
use crate::stego::crypto;
use crate::stego::error::StegoError;
use crate::stego::lsb;

/// Hide `message` in `grid` using the canonical configuration.
///
/// # Errors
/// - [`StegoError::Capacity`] if the framed payload does not fit. The grid is
///   left unchanged.
/// - [`StegoError::Framing`] if the payload is too long for the length header.
pub fn hide(grid: &mut PixelGrid, message: &[u8], passphrase: &[u8]) -> Result<(), StegoError> {
    hide_with(&StegoConfig::default(), grid, message, passphrase)
}

/// Hide `message` in `grid` with an explicit cipher/framing configuration.
pub fn hide_with(
    config: &StegoConfig,
    grid: &mut PixelGrid,
    message: &[u8],
    passphrase: &[u8],
) -> Result<(), StegoError> {
    let bits = build_bitstream(config, grid, message, passphrase)?;
    lsb::embed(grid, &bits)?;
    Ok(())
}

/// Hide `message` into a copy of `grid`. The input grid is never modified.
pub fn hide_copy(
    config: &StegoConfig,
    grid: &PixelGrid,
    message: &[u8],
    passphrase: &[u8],
) -> Result<PixelGrid, StegoError> {
    let bits = build_bitstream(config, grid, message, passphrase)?;
    Ok(lsb::embed_copy(grid, &bits)?)
}

/// Hide a UTF-8 text message with a text passphrase.
pub fn hide_text(grid: &mut PixelGrid, message: &str, passphrase: &str) -> Result<(), StegoError> {
    hide(grid, message.as_bytes(), passphrase.as_bytes())
}

fn build_bitstream(
    config: &StegoConfig,
    grid: &PixelGrid,
    message: &[u8],
    passphrase: &[u8],
) -> Result<Vec<u8>, StegoError> {
    let key = crypto::derive_key(passphrase);
    let blob = config.cipher.encrypt(message, &key);
    let bits = config.framing.frame(&blob)?;

    tracing::debug!(
        cipher = ?config.cipher,
        framing = ?config.framing,
        message_len = message.len(),
        blob_len = blob.len(),
        frame_bits = bits.len(),
        capacity_bits = capacity::capacity_bits(grid),
        "payload framed"
    );

    capacity::check(bits.len(), grid)?;
    Ok(bits)
}

/// Recover a message hidden with [`hide`].
///
/// # Errors
/// - [`StegoError::Framing`] if the grid does not hold a complete frame
///   (corrupted or not a stego image).
/// - [`StegoError::Decryption`] on a wrong passphrase or corrupted payload.
///   The error does not say which.
pub fn reveal(grid: &PixelGrid, passphrase: &[u8]) -> Result<Vec<u8>, StegoError> {
    reveal_with(&StegoConfig::default(), grid, passphrase)
}

/// Recover a message with an explicit cipher/framing configuration.
pub fn reveal_with(
    config: &StegoConfig,
    grid: &PixelGrid,
    passphrase: &[u8],
) -> Result<Vec<u8>, StegoError> {
    let blob = config.framing.extract_blob(grid)?;
    tracing::debug!(framing = ?config.framing, blob_len = blob.len(), "payload extracted");

    let key = crypto::derive_key(passphrase);
    config.cipher.decrypt(&blob, &key).map_err(|e| {
        tracing::debug!("payload decryption failed");
        StegoError::from(e)
    })
}

/// Recover a UTF-8 text message hidden with [`hide_text`].
///
/// # Errors
/// As [`reveal`], plus [`StegoError::InvalidUtf8`] if the plaintext is not UTF-8.
pub fn reveal_text(grid: &PixelGrid, passphrase: &str) -> Result<String, StegoError> {
    let plaintext = reveal(grid, passphrase.as_bytes())?;
    String::from_utf8(plaintext).map_err(|_| StegoError::InvalidUtf8)
}

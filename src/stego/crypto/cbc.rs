// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! AES-256-CBC with PKCS#7 padding.
//!
//! Blob layout:
//!
//! ```text
//! [16 bytes] random IV
//! [N bytes ] CBC ciphertext of PKCS7(plaintext), N = 16 * (len / 16 + 1)
//! ```
//!
//! There is no authentication tag. A wrong key decrypts to noise whose padding
//! almost never validates, so [`DecryptionError::BadPadding`] doubles as the
//! wrong-passphrase signal. It is a weak integrity check: an attacker with
//! block-level control can still alter decryptable plaintext.

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes256, Block as AesBlock};
use rand::RngCore;
use zeroize::Zeroizing;

use super::kdf::DerivedKey;
use crate::stego::error::DecryptionError;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;
/// IV length in bytes.
pub const IV_LEN: usize = 16;

/// Blob length for a plaintext of `plaintext_len` bytes.
///
/// PKCS#7 always adds 1..=16 bytes, so an empty message still costs one block.
pub fn blob_len(plaintext_len: usize) -> usize {
    IV_LEN + (plaintext_len / BLOCK_LEN + 1) * BLOCK_LEN
}

/// Encrypt with a fresh random IV. Returns `IV ‖ ciphertext`.
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> Vec<u8> {
    let mut iv = [0u8; IV_LEN];
    rand::thread_rng().fill_bytes(&mut iv);
    encrypt_with_iv(plaintext, key, &iv)
}

/// Encrypt with a caller-provided IV.
///
/// Only for known-answer tests; reusing an IV under the same key leaks
/// plaintext equality.
pub fn encrypt_with_iv(plaintext: &[u8], key: &DerivedKey, iv: &[u8; IV_LEN]) -> Vec<u8> {
    let cipher = Aes256::new(key.as_bytes().into());

    let pad = BLOCK_LEN - plaintext.len() % BLOCK_LEN;
    let mut padded = Zeroizing::new(Vec::with_capacity(plaintext.len() + pad));
    padded.extend_from_slice(plaintext);
    padded.resize(plaintext.len() + pad, pad as u8);

    let mut blob = Vec::with_capacity(IV_LEN + padded.len());
    blob.extend_from_slice(iv);

    let mut prev = *iv;
    for chunk in padded.chunks_exact(BLOCK_LEN) {
        let mut block = [0u8; BLOCK_LEN];
        xor_into(&mut block, chunk, &prev);
        let mut aes_block = AesBlock::from(block);
        cipher.encrypt_block(&mut aes_block);
        prev.copy_from_slice(&aes_block);
        blob.extend_from_slice(&prev);
    }

    blob
}

/// Decrypt `IV ‖ ciphertext` and strip the PKCS#7 padding.
///
/// # Errors
/// - [`DecryptionError::Malformed`] if the blob is shorter than IV plus one
///   block, or the ciphertext is not block aligned.
/// - [`DecryptionError::BadPadding`] if the padding does not validate.
pub fn decrypt(blob: &[u8], key: &DerivedKey) -> Result<Vec<u8>, DecryptionError> {
    if blob.len() < IV_LEN + BLOCK_LEN || (blob.len() - IV_LEN) % BLOCK_LEN != 0 {
        return Err(DecryptionError::Malformed { len: blob.len() });
    }

    let cipher = Aes256::new(key.as_bytes().into());
    let (iv, ciphertext) = blob.split_at(IV_LEN);

    let mut plaintext = Zeroizing::new(Vec::with_capacity(ciphertext.len()));
    let mut prev = iv;
    for chunk in ciphertext.chunks_exact(BLOCK_LEN) {
        let mut aes_block = AesBlock::clone_from_slice(chunk);
        cipher.decrypt_block(&mut aes_block);
        let mut block = [0u8; BLOCK_LEN];
        xor_into(&mut block, &aes_block, prev);
        plaintext.extend_from_slice(&block);
        prev = chunk;
    }

    let len = unpad(&plaintext)?;
    Ok(plaintext[..len].to_vec())
}

/// Validate PKCS#7 padding and return the unpadded length.
///
/// Every padding byte is checked before deciding, so the outcome does not
/// depend on where the first mismatch sits.
fn unpad(data: &[u8]) -> Result<usize, DecryptionError> {
    let pad = match data.last() {
        Some(&p) => p as usize,
        None => return Err(DecryptionError::BadPadding),
    };
    if pad == 0 || pad > BLOCK_LEN || pad > data.len() {
        return Err(DecryptionError::BadPadding);
    }
    let mismatch = data[data.len() - pad..]
        .iter()
        .fold(0u8, |acc, &b| acc | (b ^ pad as u8));
    if mismatch != 0 {
        return Err(DecryptionError::BadPadding);
    }
    Ok(data.len() - pad)
}

fn xor_into(out: &mut [u8; BLOCK_LEN], a: &[u8], b: &[u8]) {
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = x ^ y;
    }
}

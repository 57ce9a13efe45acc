// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! AES-256-GCM-SIV authenticated payload encryption.
//!
//! Blob layout:
//!
//! ```text
//! [12 bytes] random nonce
//! [N bytes ] ciphertext (same length as plaintext)
//! [16 bytes] authentication tag
//! ```
//!
//! Unlike CBC, a wrong key or any flipped bit is caught by the tag and
//! reported as [`DecryptionError::AuthenticationFailed`]. GCM-SIV is used over
//! plain GCM for its nonce-misuse resistance, since the nonce is random and
//! travels with the ciphertext.

use aes_gcm_siv::aead::Aead;
use aes_gcm_siv::{Aes256GcmSiv, KeyInit, Nonce};
use rand::RngCore;

use super::kdf::DerivedKey;
use crate::stego::error::DecryptionError;

/// AES-GCM-SIV nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Blob length for a plaintext of `plaintext_len` bytes.
pub fn blob_len(plaintext_len: usize) -> usize {
    NONCE_LEN + plaintext_len + TAG_LEN
}

/// Encrypt with a fresh random nonce. Returns `nonce ‖ ciphertext ‖ tag`.
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> Vec<u8> {
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);
    encrypt_with_nonce(plaintext, key, &nonce)
}

/// Encrypt with a caller-provided nonce.
pub fn encrypt_with_nonce(plaintext: &[u8], key: &DerivedKey, nonce: &[u8; NONCE_LEN]) -> Vec<u8> {
    let cipher = Aes256GcmSiv::new(key.as_bytes().into());
    let sealed = cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .expect("AES-GCM-SIV encrypt should not fail");

    let mut blob = Vec::with_capacity(NONCE_LEN + sealed.len());
    blob.extend_from_slice(nonce);
    blob.extend_from_slice(&sealed);
    blob
}

/// Verify and decrypt `nonce ‖ ciphertext ‖ tag`.
///
/// # Errors
/// - [`DecryptionError::Malformed`] if the blob cannot hold a nonce and a tag.
/// - [`DecryptionError::AuthenticationFailed`] if the tag does not verify.
pub fn decrypt(blob: &[u8], key: &DerivedKey) -> Result<Vec<u8>, DecryptionError> {
    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(DecryptionError::Malformed { len: blob.len() });
    }

    let (nonce, sealed) = blob.split_at(NONCE_LEN);
    let cipher = Aes256GcmSiv::new(key.as_bytes().into());
    cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| DecryptionError::AuthenticationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::crypto::kdf::derive_key;

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let key = derive_key(b"secret123");
        let blob = encrypt(b"Hello, steganography!", &key);
        assert_eq!(decrypt(&blob, &key).unwrap(), b"Hello, steganography!");
    }

    #[test]
    fn wrong_passphrase_fails() {
        let blob = encrypt(b"secret message", &derive_key(b"correct"));
        let result = decrypt(&blob, &derive_key(b"wrong"));
        assert_eq!(result, Err(DecryptionError::AuthenticationFailed));
    }

    #[test]
    fn empty_message_works() {
        let key = derive_key(b"pass");
        let blob = encrypt(b"", &key);
        assert_eq!(blob.len(), NONCE_LEN + TAG_LEN);
        assert_eq!(decrypt(&blob, &key).unwrap(), b"");
    }

    #[test]
    fn tampered_blob_rejected() {
        let key = derive_key(b"pass");
        let mut blob = encrypt(b"do not touch", &key);
        blob[NONCE_LEN + 3] ^= 0x01;
        assert_eq!(decrypt(&blob, &key), Err(DecryptionError::AuthenticationFailed));
    }

    #[test]
    fn short_blob_is_malformed() {
        let key = derive_key(b"pass");
        assert_eq!(decrypt(&[0u8; 27], &key), Err(DecryptionError::Malformed { len: 27 }));
    }

    #[test]
    fn fixed_nonce_is_deterministic() {
        let key = derive_key(b"pass");
        let nonce = [7u8; NONCE_LEN];
        assert_eq!(encrypt_with_nonce(b"m", &key, &nonce), encrypt_with_nonce(b"m", &key, &nonce));
        assert_eq!(encrypt_with_nonce(b"abc", &key, &nonce).len(), blob_len(3));
    }

    #[test]
    fn ciphertext_differs_per_encryption() {
        let key = derive_key(b"pass");
        assert_ne!(encrypt(b"same message", &key), encrypt(b"same message", &key));
    }
}

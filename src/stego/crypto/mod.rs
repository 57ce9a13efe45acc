// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Key derivation and payload encryption.
//!
//! The key always comes from [`kdf::derive_key`] (SHA-256 of the passphrase).
//! Two payload ciphers are available through [`CipherSuite`]:
//!
//! - **AES-256-CBC** (default): `IV ‖ CBC(PKCS7(message))`. Compatible with
//!   existing stego images; wrong keys surface as bad padding.
//! - **AES-256-GCM-SIV**: `nonce ‖ ciphertext ‖ tag`. Authenticated; wrong keys
//!   and tampering surface as an authentication failure.

pub mod cbc;
pub mod kdf;
pub mod siv;

use serde::{Deserialize, Serialize};

use crate::stego::error::DecryptionError;
pub use kdf::{derive_key, DerivedKey, KEY_LEN};

/// Payload cipher selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CipherSuite {
    /// AES-256-CBC with PKCS#7 padding, no authentication tag.
    #[default]
    #[serde(rename = "aes-256-cbc")]
    Aes256Cbc,
    /// AES-256-GCM-SIV with a 16-byte tag.
    #[serde(rename = "aes-256-gcm-siv")]
    Aes256GcmSiv,
}

impl CipherSuite {
    /// Encrypt `plaintext`, returning the self-contained blob (IV/nonce first).
    pub fn encrypt(self, plaintext: &[u8], key: &DerivedKey) -> Vec<u8> {
        match self {
            Self::Aes256Cbc => cbc::encrypt(plaintext, key),
            Self::Aes256GcmSiv => siv::encrypt(plaintext, key),
        }
    }

    /// Decrypt a blob produced by [`CipherSuite::encrypt`] with the same suite.
    pub fn decrypt(self, blob: &[u8], key: &DerivedKey) -> Result<Vec<u8>, DecryptionError> {
        match self {
            Self::Aes256Cbc => cbc::decrypt(blob, key),
            Self::Aes256GcmSiv => siv::decrypt(blob, key),
        }
    }

    /// Exact blob length for a plaintext of `plaintext_len` bytes.
    pub fn blob_len(self, plaintext_len: usize) -> usize {
        match self {
            Self::Aes256Cbc => cbc::blob_len(plaintext_len),
            Self::Aes256GcmSiv => siv::blob_len(plaintext_len),
        }
    }

    /// Largest plaintext whose blob fits in `blob_budget` bytes, if any.
    pub fn max_plaintext_len(self, blob_budget: usize) -> Option<usize> {
        match self {
            Self::Aes256Cbc => {
                let blocks = blob_budget.checked_sub(cbc::IV_LEN)? / cbc::BLOCK_LEN;
                // One byte of the last block is always padding.
                (blocks * cbc::BLOCK_LEN).checked_sub(1)
            }
            Self::Aes256GcmSiv => blob_budget.checked_sub(siv::NONCE_LEN + siv::TAG_LEN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suites_roundtrip() {
        let key = derive_key(b"suite");
        for suite in [CipherSuite::Aes256Cbc, CipherSuite::Aes256GcmSiv] {
            let blob = suite.encrypt("grüße".as_bytes(), &key);
            assert_eq!(blob.len(), suite.blob_len("grüße".len()));
            assert_eq!(suite.decrypt(&blob, &key).unwrap(), "grüße".as_bytes());
        }
    }

    #[test]
    fn cbc_blob_rejected_by_siv() {
        let key = derive_key(b"suite");
        let blob = CipherSuite::Aes256Cbc.encrypt(b"cross-suite", &key);
        assert_eq!(
            CipherSuite::Aes256GcmSiv.decrypt(&blob, &key),
            Err(DecryptionError::AuthenticationFailed)
        );
    }

    #[test]
    fn max_plaintext_len_inverts_blob_len() {
        for suite in [CipherSuite::Aes256Cbc, CipherSuite::Aes256GcmSiv] {
            for budget in 0..100usize {
                match suite.max_plaintext_len(budget) {
                    Some(m) => {
                        assert!(suite.blob_len(m) <= budget, "{suite:?} budget {budget}");
                        assert!(suite.blob_len(m + 1) > budget, "{suite:?} budget {budget}");
                    }
                    None => assert!(suite.blob_len(0) > budget, "{suite:?} budget {budget}"),
                }
            }
        }
    }

    #[test]
    fn default_is_cbc() {
        assert_eq!(CipherSuite::default(), CipherSuite::Aes256Cbc);
    }
}

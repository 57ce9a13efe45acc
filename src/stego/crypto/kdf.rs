// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Passphrase to AES-256 key derivation.
//!
//! The key is a single SHA-256 over the passphrase bytes. There is no salt and
//! no iteration count, so identical passphrases always give identical keys and
//! weak passphrases are open to offline dictionary attack. Existing stego
//! images depend on this exact derivation, so it must stay as is.

use core::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// 256-bit symmetric key derived from a passphrase. Wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKey(Zeroizing<[u8; KEY_LEN]>);

impl DerivedKey {
    /// Wrap raw key bytes (known-answer tests, externally managed keys).
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive the encryption key from a passphrase.
///
/// Deterministic and total: the same bytes always yield the same key.
pub fn derive_key(passphrase: &[u8]) -> DerivedKey {
    let digest = Sha256::digest(passphrase);
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key.copy_from_slice(&digest);
    DerivedKey(key)
}

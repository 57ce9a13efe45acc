// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Codec configuration.
//!
//! Selects the payload cipher and the bitstream layout. Both sides of an
//! exchange must use the same configuration; nothing in the embedded stream
//! identifies which one was used.
//!
//! ```toml
//! cipher = "aes-256-gcm-siv"
//! framing = "length-prefixed"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::stego::crypto::CipherSuite;
use crate::stego::frame::Framing;

/// Cipher and framing used by `hide_with` / `reveal_with`.
///
/// The default (AES-256-CBC, length-prefixed) is the canonical wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StegoConfig {
    /// Payload cipher.
    pub cipher: CipherSuite,
    /// Bitstream layout inside the pixel LSBs.
    pub framing: Framing,
}

impl StegoConfig {
    /// AES-256-CBC with base64 text ended by `###END###`, as written by the
    /// older sentinel-based tool.
    pub fn legacy() -> Self {
        Self {
            cipher: CipherSuite::Aes256Cbc,
            framing: Framing::Sentinel,
        }
    }

    /// Authenticated payloads with the canonical length-prefixed layout.
    pub fn authenticated() -> Self {
        Self {
            cipher: CipherSuite::Aes256GcmSiv,
            framing: Framing::LengthPrefixed,
        }
    }

    /// Parse a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

/// Configuration loading errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

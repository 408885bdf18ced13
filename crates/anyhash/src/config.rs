//! # Configuration: Map-Key Digest and Depth Budget
//!
//! Map entries are ordered by an auxiliary digest of each key. Which digest
//! is used is part of the canonical form, so it is fixed per computation:
//!
//! - A [`Config`] value carries it explicitly into a
//!   [`Canonicalizer`](crate::Canonicalizer), together with an optional
//!   nesting budget.
//! - The free functions ([`hash_with`](crate::hash_with),
//!   [`digest_sha256`](crate::digest_sha256), ...) read a process-wide
//!   default instead. An embedding application may replace it with
//!   [`set_default_key_digest`] before the first hash is computed; after
//!   that it is frozen.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! key_digest: sha256
//! max_depth: 512
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use crate::error::ConfigError;

/// Auxiliary digest used to derive sortable keys for map entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyDigest {
    /// MD5, 128-bit.
    #[default]
    Md5,
    /// SHA-1, 160-bit.
    Sha1,
    /// SHA-256.
    Sha256,
    /// SHA-512.
    Sha512,
}

impl KeyDigest {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Length of the produced sort key in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    /// Digest a key's canonical encoding into its sort key.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Md5 => md5::compute(data).0.to_vec(),
            Self::Sha1 => sha1::Sha1::digest(data).to_vec(),
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}

impl fmt::Display for KeyDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyDigest {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(ConfigError::UnknownKeyDigest(s.to_string())),
        }
    }
}

/// Immutable settings for one [`Canonicalizer`](crate::Canonicalizer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Digest used to order map entries.
    pub key_digest: KeyDigest,
    /// Maximum nesting depth. `None` walks without a bound.
    pub max_depth: Option<usize>,
}

impl Config {
    /// Configuration using the process-wide map-key digest and no depth budget.
    pub fn process_default() -> Self {
        Self {
            key_digest: default_key_digest(),
            max_depth: None,
        }
    }

    pub fn with_key_digest(mut self, key_digest: KeyDigest) -> Self {
        self.key_digest = key_digest;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}

static DEFAULT_KEY_DIGEST: OnceCell<KeyDigest> = OnceCell::new();

/// Replace the process-wide map-key digest.
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyInitialized`] once the default has been
/// set or read, so a running computation never sees it change.
pub fn set_default_key_digest(key_digest: KeyDigest) -> Result<(), ConfigError> {
    DEFAULT_KEY_DIGEST
        .set(key_digest)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// The process-wide map-key digest, [`KeyDigest::Md5`] unless replaced.
/// Reading it freezes the value.
pub fn default_key_digest() -> KeyDigest {
    *DEFAULT_KEY_DIGEST.get_or_init(KeyDigest::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_digest_lengths_match_output() {
        for key_digest in [KeyDigest::Md5, KeyDigest::Sha1, KeyDigest::Sha256, KeyDigest::Sha512] {
            assert_eq!(key_digest.digest(b"Hello").len(), key_digest.output_len());
        }
    }

    #[test]
    fn test_md5_key_digest_vector() {
        assert_eq!(
            hex::encode(KeyDigest::Md5.digest(b"Hello")),
            "8b1a9953c4611296a827abf8c47804d7"
        );
    }

    #[test]
    fn test_key_digest_from_str() {
        assert_eq!("MD5".parse::<KeyDigest>().unwrap(), KeyDigest::Md5);
        assert_eq!("sha512".parse::<KeyDigest>().unwrap(), KeyDigest::Sha512);
        assert!(matches!(
            "crc32".parse::<KeyDigest>(),
            Err(ConfigError::UnknownKeyDigest(name)) if name == "crc32"
        ));
    }

    #[test]
    fn test_key_digest_display_roundtrips() {
        for key_digest in [KeyDigest::Md5, KeyDigest::Sha1, KeyDigest::Sha256, KeyDigest::Sha512] {
            assert_eq!(key_digest.to_string().parse::<KeyDigest>().unwrap(), key_digest);
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.key_digest, KeyDigest::Md5);
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_config_from_yaml() {
        let config = Config::from_yaml_str("key_digest: sha256\nmax_depth: 64\n").unwrap();
        assert_eq!(config, Config::default().with_key_digest(KeyDigest::Sha256).with_max_depth(64));
    }

    #[test]
    fn test_config_from_partial_yaml() {
        let config = Config::from_yaml_str("max_depth: 3\n").unwrap();
        assert_eq!(config.key_digest, KeyDigest::Md5);
        assert_eq!(config.max_depth, Some(3));
    }

    #[test]
    fn test_config_rejects_unknown_digest() {
        assert!(matches!(
            Config::from_yaml_str("key_digest: whirlpool\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_config_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anyhash.yaml");
        std::fs::write(&path, "key_digest: sha1\n").unwrap();
        let config = Config::from_yaml_file(&path).unwrap();
        assert_eq!(config.key_digest, KeyDigest::Sha1);
    }

    #[test]
    fn test_default_key_digest_freezes_after_read() {
        let current = default_key_digest();
        assert!(matches!(
            set_default_key_digest(KeyDigest::Sha512),
            Err(ConfigError::AlreadyInitialized)
        ));
        assert_eq!(default_key_digest(), current);
    }
}

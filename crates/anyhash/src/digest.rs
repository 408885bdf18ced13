//! # Output Wrappers: Fixed-Algorithm Digests
//!
//! Thin wrappers that create a fresh hash sink, walk the value into it and
//! return the finalized digest. They use the process-wide map-key digest
//! and no depth budget; use a [`Canonicalizer`](crate::Canonicalizer) for
//! explicit configuration.
//!
//! [`hash_with`] is the generic entry point: it writes the canonical stream
//! into any caller-supplied sink and leaves finalization to the caller, so
//! checksums and key-derivation functions can reuse the same encoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::digest::{Digest, Output, Update};
use sha2::{Sha256, Sha512};
use sha1::Sha1;

use crate::canonical::write_unbounded;
use crate::config::default_key_digest;
use crate::error::ConfigError;
use crate::shape::AnyHash;

/// Write the canonical encoding of `value` into `sink`.
pub fn hash_with<S, T>(sink: &mut S, value: &T)
where
    S: Update + ?Sized,
    T: AnyHash + ?Sized,
{
    write_unbounded(sink, value, default_key_digest());
}

/// Digest `value` with any fixed-output digest.
pub fn digest_with<D, T>(value: &T) -> Output<D>
where
    D: Digest + Update,
    T: AnyHash + ?Sized,
{
    let mut hasher = D::new();
    hash_with(&mut hasher, value);
    hasher.finalize()
}

/// SHA-512 digest of the canonical encoding of `value`.
pub fn digest_sha512<T: AnyHash + ?Sized>(value: &T) -> [u8; 64] {
    let hash = digest_with::<Sha512, T>(value);
    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&hash);
    bytes
}

/// SHA-256 digest of the canonical encoding of `value`.
pub fn digest_sha256<T: AnyHash + ?Sized>(value: &T) -> [u8; 32] {
    let hash = digest_with::<Sha256, T>(value);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    bytes
}

/// SHA-1 digest of the canonical encoding of `value`.
pub fn digest_sha1<T: AnyHash + ?Sized>(value: &T) -> [u8; 20] {
    let hash = digest_with::<Sha1, T>(value);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash);
    bytes
}

/// Named output digest algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Sha1,
    #[default]
    Sha256,
    Sha512,
}

impl DigestAlgorithm {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    pub fn output_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    /// Digest `value` with this algorithm using the process-wide defaults.
    pub fn compute<T: AnyHash + ?Sized>(&self, value: &T) -> ContentDigest {
        let bytes = match self {
            Self::Sha1 => digest_sha1(value).to_vec(),
            Self::Sha256 => digest_sha256(value).to_vec(),
            Self::Sha512 => digest_sha512(value).to_vec(),
        };
        ContentDigest::new(*self, bytes)
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A finalized digest with its algorithm tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    /// The hash algorithm that produced this digest.
    pub algorithm: DigestAlgorithm,
    /// The raw digest bytes.
    pub bytes: Vec<u8>,
}

impl ContentDigest {
    pub fn new(algorithm: DigestAlgorithm, bytes: Vec<u8>) -> Self {
        Self { algorithm, bytes }
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl AsRef<[u8]> for ContentDigest {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

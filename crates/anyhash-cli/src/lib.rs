//! # anyhash-cli: Canonical Digests from the Command Line
//!
//! Provides the `anyhash` command-line interface over JSON and YAML
//! documents. Every document is parsed into a `serde_json::Value` and
//! canonicalized, so two files that differ only in key order, formatting
//! or empty entries print the same digest.
//!
//! ## Subcommands
//!
//! - `anyhash digest`: print `<algorithm>:<hex>  <path>` per document.
//! - `anyhash stream`: print the canonical byte stream as hex.
//!
//! ```bash
//! anyhash digest config.yaml other.json
//! anyhash --key-digest sha256 digest --algorithm sha512 -
//! anyhash stream config.yaml
//! ```

pub mod digest;
pub mod input;
pub mod stream;

use std::path::Path;

use anyhow::{Context, Result};

use anyhash::{Canonicalizer, Config, KeyDigest};

/// Canonicalization settings shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct CanonicalOptions<'a> {
    /// YAML file holding a [`Config`].
    pub config: Option<&'a Path>,
    /// Overrides the map key digest from the config file.
    pub key_digest: Option<KeyDigest>,
    /// Overrides the nesting budget from the config file.
    pub max_depth: Option<usize>,
}

impl CanonicalOptions<'_> {
    /// Build the canonicalizer: process defaults, then the config file,
    /// then the command-line overrides.
    pub fn canonicalizer(&self) -> Result<Canonicalizer> {
        let mut config = match self.config {
            Some(path) => Config::from_yaml_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => Config::process_default(),
        };
        if let Some(key_digest) = self.key_digest {
            config = config.with_key_digest(key_digest);
        }
        if let Some(max_depth) = self.max_depth {
            config = config.with_max_depth(max_depth);
        }
        tracing::debug!(
            key_digest = %config.key_digest,
            max_depth = ?config.max_depth,
            "resolved canonicalization config"
        );
        Ok(Canonicalizer::new(config))
    }
}

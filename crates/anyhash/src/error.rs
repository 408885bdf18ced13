//! # Error Types
//!
//! The canonical walk itself is total: introspection denial, hook fallback
//! and unsupported shapes never surface as errors. What remains are the
//! explicit depth budget and configuration handling.

use thiserror::Error;

/// Error from a budgeted canonical walk.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanonicalizeError {
    /// The value nests deeper than the configured budget allows.
    #[error("value nesting exceeds the configured depth limit of {limit}")]
    DepthExceeded {
        /// The configured maximum depth.
        limit: usize,
    },
}

/// Error in configuration handling.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The process-wide map-key digest was already read or set.
    #[error("the process-wide map-key digest is already initialized")]
    AlreadyInitialized,

    /// Unrecognized map-key digest name.
    #[error("unknown map-key digest: {0:?} (expected md5, sha1, sha256 or sha512)")]
    UnknownKeyDigest(String),

    /// Unrecognized output digest name.
    #[error("unknown digest algorithm: {0:?} (expected sha1, sha256 or sha512)")]
    UnknownAlgorithm(String),

    /// Reading a configuration file failed.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// Parsing a configuration file failed.
    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

//! # anyhash: Deterministic Digests of Arbitrary Structured Values
//!
//! Computes a digest of any structured value (records, maps, sequences,
//! references, dynamic wrappers, scalars) such that semantically equivalent
//! values always hash identically, and any meaningful change in content
//! changes the hash. Intended for cache keys, change detection and
//! deduplication signatures over data shapes that evolve.
//!
//! ## Equivalence
//!
//! Two values produce the same canonical stream when they have the same
//! non-default fields, entries and elements at every depth, regardless of:
//!
//! - map iteration order,
//! - pointer identity or indirection depth,
//! - zero-valued fields added to a record type later.
//!
//! Fields that are not publicly visible, or tagged `#[anyhash = "-"]`, are
//! treated as if they did not exist.
//!
//! ## Example
//!
//! ```
//! use anyhash::{digest_sha256, AnyHash};
//!
//! #[derive(AnyHash)]
//! pub struct Version1 {
//!     pub name: String,
//!     pub value: String,
//! }
//!
//! #[derive(AnyHash)]
//! pub struct Version2 {
//!     pub name: String,
//!     pub value: String,
//!     pub added_later: Option<u32>,
//! }
//!
//! let old = Version1 { name: "fred".into(), value: "blogs".into() };
//! let new = Version2 { name: "fred".into(), value: "blogs".into(), added_later: None };
//! assert_eq!(digest_sha256(&old), digest_sha256(&new));
//! ```
//!
//! ## Crate Policy
//!
//! - The canonical walk never fails on acyclic input; see
//!   [`Canonicalizer`] for an explicit depth budget.
//! - Not a reversible serialization format and not a commitment scheme:
//!   there is no domain separation and no length framing.
//! - No `unwrap()` outside tests.

// Lets `#[derive(AnyHash)]` refer to `::anyhash` from inside this crate.
extern crate self as anyhash;

pub mod canonical;
pub mod collections;
pub mod config;
pub mod digest;
pub mod dynamic;
pub mod error;
pub mod external;
#[cfg(feature = "json")]
pub mod json;
mod ordering;
pub mod primitive;
pub mod record;
pub mod shape;

pub use canonical::{CanonicalStream, Canonicalizer};
pub use config::{default_key_digest, set_default_key_digest, Config, KeyDigest};
pub use digest::{
    digest_sha1, digest_sha256, digest_sha512, digest_with, hash_with, ContentDigest,
    DigestAlgorithm,
};
pub use error::{CanonicalizeError, ConfigError};
pub use record::{Field, Record, Visibility, EXCLUDE_TAG};
pub use shape::{AnyHash, Elements, Entries, Float, Integer, Shape};

#[cfg(feature = "derive")]
pub use anyhash_derive::AnyHash;

/// Capture the canonical byte stream of `value` using the process-wide
/// defaults.
pub fn canonical_stream<T: AnyHash + ?Sized>(value: &T) -> CanonicalStream {
    let mut stream = CanonicalStream::new();
    hash_with(&mut stream, value);
    stream
}

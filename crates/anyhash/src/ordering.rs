//! # Canonical Ordering
//!
//! Maps and records have no meaningful in-memory order, so both are sorted
//! before emission:
//!
//! - **Map entries** by the auxiliary digest of each key's canonical
//!   encoding ([`KeyEntry`]). Keys may be composite, so they are compared
//!   through their sub-hash rather than directly.
//! - **Record fields** by the raw bytes of the field name ([`FieldEntry`]).
//!
//! Both sorts are stable and compare bytes lexicographically. Two distinct
//! map keys with the same sub-hash keep their iteration order; with a
//! 128-bit or wider auxiliary digest this is not expected in practice.
//! Sequences are never reordered.

use crate::shape::AnyHash;

/// Something sorted by a byte key.
pub(crate) trait SortKey {
    fn sort_key(&self) -> &[u8];
}

/// A map entry paired with the auxiliary digest of its key.
pub(crate) struct KeyEntry<'a> {
    pub(crate) key_digest: Vec<u8>,
    pub(crate) value: &'a dyn AnyHash,
}

impl SortKey for KeyEntry<'_> {
    fn sort_key(&self) -> &[u8] {
        &self.key_digest
    }
}

/// A selected record field.
pub(crate) struct FieldEntry<'a> {
    pub(crate) name: &'a [u8],
    pub(crate) value: &'a dyn AnyHash,
}

impl SortKey for FieldEntry<'_> {
    fn sort_key(&self) -> &[u8] {
        self.name
    }
}

/// Stable ascending sort by byte key.
pub(crate) fn canonical_order<E: SortKey>(entries: &mut [E]) {
    entries.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
}

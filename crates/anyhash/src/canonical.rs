//! # Canonical Walker: Deterministic Byte Stream Production
//!
//! Walks any [`AnyHash`] value and writes its canonical encoding into an
//! incremental hash sink (anything implementing [`digest::Update`]).
//!
//! ## Encoding Rules
//!
//! At every node, before anything else, the zero-value policy applies: a
//! value that is its type's default writes nothing, and neither does any of
//! its subtree. Otherwise:
//!
//! 1. **Text** writes its raw bytes; **integers** and **floats** their
//!    little-endian form at declared width; **`true`** writes `0x01`.
//! 2. **References** and **dynamic** wrappers write their target.
//! 3. **Sequences** write their elements in order, with no separators.
//! 4. **Maps** drop entries with zero values, then write each remaining
//!    entry as `key_digest(canonical(key))` followed by `canonical(value)`,
//!    ordered by the key digest bytes.
//! 5. **Records** write their custom canonical bytes if they have any.
//!    Otherwise each selected field is written as its name bytes followed by
//!    `canonical(value)`, ordered by name bytes.
//! 6. **Other** shapes write their textual rendering.
//!
//! No length prefixes or delimiters are emitted; key digests and field names
//! act as implicit delimiters.
//!
//! ## Depth Budget
//!
//! The walk recurses once per nesting level. Without a budget, pathological
//! nesting exhausts the stack. With [`Config::max_depth`] set, the walk
//! (zero-value checks of nested records included) stops at the limit and
//! [`Canonicalizer::write`] reports
//! [`CanonicalizeError::DepthExceeded`]; whatever was written to the sink
//! up to that point is incomplete and must be discarded.
//!
//! [`digest::Update`]: sha2::digest::Update

use sha2::digest::{Digest, Update};

use crate::config::{Config, KeyDigest};
use crate::digest::{ContentDigest, DigestAlgorithm};
use crate::error::CanonicalizeError;
use crate::ordering::{canonical_order, FieldEntry, KeyEntry};
use crate::record::{Field, Record};
use crate::shape::{AnyHash, Entries, Shape};

/// The captured canonical byte stream of a value.
///
/// Implements [`Update`], so it is itself a valid sink: feeding the same
/// bytes to any other sink reproduces that sink's digest of the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CanonicalStream(Vec<u8>);

impl CanonicalStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Access the captured bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the captured stream.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the value contributed no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl Update for CanonicalStream {
    fn update(&mut self, data: &[u8]) {
        self.0.extend_from_slice(data);
    }
}

impl AsRef<[u8]> for CanonicalStream {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<CanonicalStream> for Vec<u8> {
    fn from(stream: CanonicalStream) -> Self {
        stream.0
    }
}

/// Canonical encoder bound to one immutable [`Config`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Canonicalizer {
    config: Config,
}

impl Canonicalizer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Write the canonical encoding of `value` into `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizeError::DepthExceeded`] if a depth budget is
    /// configured and `value` nests deeper. Never fails without a budget.
    pub fn write<S, T>(&self, sink: &mut S, value: &T) -> Result<(), CanonicalizeError>
    where
        S: Update + ?Sized,
        T: AnyHash + ?Sized,
    {
        let mut walker = Walker::new(sink, self.config.key_digest, self.config.max_depth);
        walker.walk_root(value);
        match walker.exhausted {
            Some(limit) => Err(CanonicalizeError::DepthExceeded { limit }),
            None => Ok(()),
        }
    }

    /// Capture the canonical byte stream of `value`.
    pub fn stream<T: AnyHash + ?Sized>(
        &self,
        value: &T,
    ) -> Result<CanonicalStream, CanonicalizeError> {
        let mut stream = CanonicalStream::new();
        self.write(&mut stream, value)?;
        Ok(stream)
    }

    /// Hash `value` with digest `D` and return the finalized output.
    pub fn digest<D, T>(&self, value: &T) -> Result<sha2::digest::Output<D>, CanonicalizeError>
    where
        D: Digest + Update,
        T: AnyHash + ?Sized,
    {
        let mut hasher = D::new();
        self.write(&mut hasher, value)?;
        Ok(hasher.finalize())
    }

    /// Hash `value` with a named algorithm, tagging the result.
    pub fn content_digest<T: AnyHash + ?Sized>(
        &self,
        algorithm: DigestAlgorithm,
        value: &T,
    ) -> Result<ContentDigest, CanonicalizeError> {
        let bytes = match algorithm {
            DigestAlgorithm::Sha1 => self.digest::<sha1::Sha1, T>(value)?.to_vec(),
            DigestAlgorithm::Sha256 => self.digest::<sha2::Sha256, T>(value)?.to_vec(),
            DigestAlgorithm::Sha512 => self.digest::<sha2::Sha512, T>(value)?.to_vec(),
        };
        Ok(ContentDigest::new(algorithm, bytes))
    }
}

/// Write the canonical encoding without a depth budget.
pub(crate) fn write_unbounded<S, T>(sink: &mut S, value: &T, key_digest: KeyDigest)
where
    S: Update + ?Sized,
    T: AnyHash + ?Sized,
{
    Walker::new(sink, key_digest, None).walk_root(value);
}

/// One traversal. Holds the sink and the budget state.
struct Walker<'s, S: ?Sized> {
    sink: &'s mut S,
    key_digest: KeyDigest,
    max_depth: Option<usize>,
    /// Set to the limit once the budget is exhausted; stops all output.
    exhausted: Option<usize>,
}

impl<'s, S: Update + ?Sized> Walker<'s, S> {
    fn new(sink: &'s mut S, key_digest: KeyDigest, max_depth: Option<usize>) -> Self {
        Self {
            sink,
            key_digest,
            max_depth,
            exhausted: None,
        }
    }

    fn walk_root<T: AnyHash + ?Sized>(&mut self, value: &T) {
        self.visit(value, 0, false);
    }

    fn walk(&mut self, value: &dyn AnyHash, depth: usize) {
        self.visit(value, depth, false);
    }

    /// Budget check for a node at `depth`. Returns false once the walk must stop.
    fn enter(&mut self, depth: usize) -> bool {
        if self.exhausted.is_some() {
            return false;
        }
        if let Some(limit) = self.max_depth {
            if depth > limit {
                tracing::warn!(limit, "canonical walk exceeded depth budget");
                self.exhausted = Some(limit);
                return false;
            }
        }
        true
    }

    /// Zero-value policy for a node at `depth`, charged against the budget.
    ///
    /// Records with fields are judged field by field here rather than through
    /// [`AnyHash::is_zero`], so a deep chain of records stops at the limit
    /// instead of recursing to its end. After exhaustion every value reads as
    /// zero.
    fn is_zero_at(&mut self, value: &dyn AnyHash, depth: usize) -> bool {
        if !self.enter(depth) {
            return true;
        }
        match value.shape() {
            Shape::Record(record) => {
                let fields = record.fields();
                if fields.is_empty() {
                    value.is_zero()
                } else {
                    fields
                        .iter()
                        .all(|field| self.is_zero_at(field.value, depth + 1))
                }
            }
            Shape::Dynamic(Some(inner)) => self.is_zero_at(inner, depth + 1),
            _ => value.is_zero(),
        }
    }

    /// Walk one node. `nonzero` is set when the caller has already applied
    /// the zero-value policy to it.
    fn visit<T: AnyHash + ?Sized>(&mut self, value: &T, depth: usize, nonzero: bool) {
        if !self.enter(depth) {
            return;
        }
        match value.shape() {
            Shape::Record(record) => {
                let fields = record.fields();
                if fields.is_empty() {
                    if nonzero || !value.is_zero() {
                        self.emit_record(record, Vec::new(), depth);
                    }
                } else if let Some(selected) = self.nonzero_fields(fields, depth) {
                    self.emit_record(record, selected, depth);
                }
            }
            Shape::Reference(target) => {
                if let Some(target) = target {
                    self.walk(target, depth + 1);
                }
            }
            // Zero elements write nothing, so an all-zero sequence needs no
            // separate check here.
            Shape::Sequence(elements) => {
                for element in elements {
                    self.walk(element, depth + 1);
                }
            }
            Shape::Dynamic(Some(inner)) => self.visit(inner, depth + 1, nonzero),
            Shape::Dynamic(None) => {
                tracing::trace!("dynamic value denied introspection; contributes nothing");
            }
            Shape::Map(entries) => {
                if nonzero || !value.is_zero() {
                    self.emit_map(entries, depth);
                }
            }
            scalar => {
                if nonzero || !value.is_zero() {
                    self.emit_scalar(scalar);
                }
            }
        }
    }

    fn emit_scalar(&mut self, shape: Shape<'_>) {
        match shape {
            Shape::Text(text) => self.sink.update(text.as_bytes()),
            Shape::Int(int) => int.write_le(&mut *self.sink),
            Shape::Float(float) => float.write_le(&mut *self.sink),
            Shape::Bool(flag) => {
                if flag {
                    self.sink.update(&[1]);
                }
            }
            Shape::Other(text) => {
                tracing::trace!(text = %text, "unsupported shape encoded as text");
                self.sink.update(text.as_bytes());
            }
            // composite shapes never reach here; `visit` walks them
            _ => {}
        }
    }

    fn emit_map(&mut self, entries: Entries<'_>, depth: usize) {
        let mut keyed = Vec::new();
        for (key, value) in entries {
            if self.is_zero_at(value, depth + 1) {
                continue;
            }
            let key_digest = self.key_sort_bytes(key, depth + 1);
            keyed.push(KeyEntry { key_digest, value });
        }
        canonical_order(&mut keyed);

        for entry in keyed {
            self.sink.update(&entry.key_digest);
            self.visit(entry.value, depth + 1, true);
        }
    }

    /// Auxiliary digest of a key's canonical encoding, sharing this walk's budget.
    fn key_sort_bytes(&mut self, key: &dyn AnyHash, depth: usize) -> Vec<u8> {
        let mut stream = CanonicalStream::new();
        let mut sub = Walker::new(&mut stream, self.key_digest, self.max_depth);
        sub.walk(key, depth);
        if sub.exhausted.is_some() {
            self.exhausted = sub.exhausted;
        }
        self.key_digest.digest(stream.as_bytes())
    }

    /// Selected, non-zero fields of a record, with each field's zero check
    /// run once. `None` when every declared field is zero, hidden ones
    /// included, which makes the record itself zero.
    fn nonzero_fields<'f>(
        &mut self,
        fields: Vec<Field<'f>>,
        depth: usize,
    ) -> Option<Vec<FieldEntry<'f>>> {
        let mut selected = Vec::new();
        let mut hidden = Vec::new();
        for field in fields {
            if !field.is_selected() {
                hidden.push(field.value);
            } else if !self.is_zero_at(field.value, depth + 1) {
                selected.push(FieldEntry {
                    name: field.name.as_bytes(),
                    value: field.value,
                });
            }
        }
        let zero = selected.is_empty()
            && hidden
                .into_iter()
                .all(|value| self.is_zero_at(value, depth + 1));
        (!zero).then_some(selected)
    }

    fn emit_record(
        &mut self,
        record: &dyn Record,
        mut selected: Vec<FieldEntry<'_>>,
        depth: usize,
    ) {
        if let Some(bytes) = record.canonical_bytes() {
            self.sink.update(&bytes);
            return;
        }
        tracing::trace!("record has no canonical bytes; walking fields");

        canonical_order(&mut selected);
        for entry in selected {
            self.sink.update(entry.name);
            self.visit(entry.value, depth + 1, true);
        }
    }
}

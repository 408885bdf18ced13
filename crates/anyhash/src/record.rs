//! # Records: Named Fields, Field Selection, Encoding Hook
//!
//! A record lists its fields in declaration order, each with a visibility
//! flag and an optional tag. The walker keeps only fields that are
//! publicly visible, not tagged with the exclusion marker `-`, and not
//! zero; everything else is treated as if the field did not exist.
//! Hidden fields still count when deciding whether the record as a whole
//! is zero.
//!
//! A record may also supply its own canonical bytes through
//! [`Record::canonical_bytes`]. When it does, those bytes are emitted
//! verbatim and the fields are never visited.

use crate::shape::AnyHash;

/// Tag value that removes a field from the canonical encoding.
pub const EXCLUDE_TAG: &str = "-";

/// Whether a field is visible outside the type that declares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Visible to external code; participates in the encoding.
    Public,
    /// Not externally visible; never affects the encoding.
    Private,
}

/// One declared field of a record.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    /// Field name; its bytes order the field and prefix its value.
    pub name: &'a str,
    /// Field value.
    pub value: &'a dyn AnyHash,
    /// Only [`Visibility::Public`] fields are encoded.
    pub visibility: Visibility,
    /// Per-field annotation; a lone `-` excludes the field.
    pub tag: Option<&'a str>,
}

impl<'a> Field<'a> {
    /// A public, untagged field.
    pub fn new(name: &'a str, value: &'a dyn AnyHash) -> Self {
        Self {
            name,
            value,
            visibility: Visibility::Public,
            tag: None,
        }
    }

    /// Mark the field as not externally visible.
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Attach a tag to the field.
    pub fn tagged(mut self, tag: &'a str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Whether the field's tag is the exclusion marker.
    pub fn is_excluded(&self) -> bool {
        self.tag.map_or(false, |tag| tag.trim() == EXCLUDE_TAG)
    }

    /// Whether the field may take part in the encoding: public and not
    /// excluded. Zero values are dropped separately by the walker.
    pub fn is_selected(&self) -> bool {
        self.visibility == Visibility::Public && !self.is_excluded()
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// A structured value with named fields.
pub trait Record {
    /// Every declared field, in declaration order, including private and
    /// excluded ones.
    fn fields(&self) -> Vec<Field<'_>>;

    /// Custom encoding hook.
    ///
    /// `Some(bytes)` (even empty) replaces the structural walk with exactly
    /// those bytes. `None` means the type has no canonical form of its own,
    /// or could not produce one; the walker then visits the fields.
    ///
    /// The hook is only consulted for non-zero records. A record with fields
    /// is zero when all of them are. A record that lists no fields is judged
    /// by [`AnyHash::is_zero`] alone, whose default treats it as always zero:
    /// hook-only types must override `is_zero`, or the hook never runs.
    fn canonical_bytes(&self) -> Option<Vec<u8>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusion_marker_is_literal_dash() {
        let value = String::from("x");
        assert!(Field::new("a", &value).tagged("-").is_excluded());
        assert!(Field::new("a", &value).tagged(" - ").is_excluded());
        assert!(!Field::new("a", &value).tagged("-,omitempty").is_excluded());
        assert!(!Field::new("a", &value).tagged("").is_excluded());
        assert!(!Field::new("a", &value).is_excluded());
    }

    #[test]
    fn test_selection_drops_private_and_excluded() {
        let set = String::from("set");
        let unset = String::new();
        let fields = vec![
            Field::new("kept", &set),
            Field::new("hidden", &set).private(),
            Field::new("ignored", &set).tagged("-"),
            Field::new("empty", &unset),
            Field::new("other_tag", &set).tagged("name"),
        ];
        let names: Vec<&str> = fields
            .iter()
            .filter(|field| field.is_selected())
            .map(|field| field.name)
            .collect();
        assert_eq!(names, vec!["kept", "empty", "other_tag"]);
    }

    #[test]
    fn test_default_hook_declines() {
        struct Plain;
        impl Record for Plain {
            fn fields(&self) -> Vec<Field<'_>> {
                Vec::new()
            }
        }
        assert!(Plain.canonical_bytes().is_none());
    }
}

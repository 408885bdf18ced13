//! # Value Classification: The `AnyHash` Capability
//!
//! Every value that can be canonicalized implements [`AnyHash`]. The trait
//! answers two questions for the walker:
//!
//! 1. **What shape is this value?** ([`AnyHash::shape`]) One of text,
//!    integer, float, boolean, reference, sequence, map, record, dynamic
//!    wrapper, or a best-effort textual fallback.
//! 2. **Is this value its type's zero/default?** ([`AnyHash::is_zero`])
//!    Zero values contribute no bytes at any depth.
//!
//! The capability is open: any crate can implement it for its own types,
//! by hand or through `#[derive(AnyHash)]`. Nothing here can fail;
//! unsupported shapes degrade to [`Shape::Other`].

use sha2::digest::Update;

use crate::record::Record;

/// Iterator over the elements of a sequence, in their natural order.
pub type Elements<'a> = Box<dyn Iterator<Item = &'a dyn AnyHash> + 'a>;

/// Iterator over the `(key, value)` entries of a map, in any order.
pub type Entries<'a> = Box<dyn Iterator<Item = (&'a dyn AnyHash, &'a dyn AnyHash)> + 'a>;

/// A value that can be walked by the canonicalizer.
pub trait AnyHash {
    /// Classify this value and expose its children.
    fn shape(&self) -> Shape<'_>;

    /// Whether this value is its type's zero/default value.
    ///
    /// The default derives the answer from [`AnyHash::shape`]. Implementors
    /// override it when the type's notion of "zero" differs from the
    /// emptiness of its shape (fixed arrays, records with hooks, timestamps).
    ///
    /// For records that list fields, the walker ignores this method and
    /// checks the fields itself. Records that list none (encoded purely
    /// through [`Record::canonical_bytes`]) are judged by this method only.
    fn is_zero(&self) -> bool {
        self.shape().is_zero()
    }
}

/// The shape of one node in the value graph.
pub enum Shape<'a> {
    /// Text; emits its raw UTF-8 bytes.
    Text(&'a str),
    /// Integer of any width and signedness; emits little-endian bytes at its declared width.
    Int(Integer),
    /// Float of any width; emits its little-endian IEEE-754 bits.
    Float(Float),
    /// Boolean; `true` emits `0x01`, `false` is zero.
    Bool(bool),
    /// Optional indirection. `None` is an absent reference.
    Reference(Option<&'a dyn AnyHash>),
    /// Ordered elements; order is significant and preserved.
    Sequence(Elements<'a>),
    /// Unordered `(key, value)` entries with unique keys.
    Map(Entries<'a>),
    /// A structured value with named fields.
    Record(&'a dyn Record),
    /// A polymorphic wrapper resolved to its concrete value.
    /// `None` means the concrete value could not be inspected.
    Dynamic(Option<&'a dyn AnyHash>),
    /// Anything else, rendered as best-effort text.
    Other(String),
}

impl<'a> Shape<'a> {
    /// Zero-value policy for a shape: empty text, zero numbers, `false`,
    /// absent references, empty containers, and records whose every
    /// declared field is zero.
    pub fn is_zero(self) -> bool {
        match self {
            Shape::Text(text) => text.is_empty(),
            Shape::Int(int) => int.is_zero(),
            Shape::Float(float) => float.is_zero(),
            Shape::Bool(flag) => !flag,
            Shape::Reference(target) => target.is_none(),
            Shape::Sequence(mut elements) => elements.next().is_none(),
            Shape::Map(mut entries) => entries.next().is_none(),
            Shape::Record(record) => record.fields().iter().all(|field| field.value.is_zero()),
            Shape::Dynamic(inner) => inner.map_or(true, |value| value.is_zero()),
            Shape::Other(text) => text.is_empty(),
        }
    }

    /// Short name of the shape, used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Text(_) => "text",
            Shape::Int(_) => "integer",
            Shape::Float(_) => "float",
            Shape::Bool(_) => "bool",
            Shape::Reference(_) => "reference",
            Shape::Sequence(_) => "sequence",
            Shape::Map(_) => "map",
            Shape::Record(_) => "record",
            Shape::Dynamic(_) => "dynamic",
            Shape::Other(_) => "other",
        }
    }
}

impl std::fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Shape::Int(int) => f.debug_tuple("Int").field(int).finish(),
            Shape::Float(float) => f.debug_tuple("Float").field(float).finish(),
            Shape::Bool(flag) => f.debug_tuple("Bool").field(flag).finish(),
            Shape::Other(text) => f.debug_tuple("Other").field(text).finish(),
            other => f.write_str(other.kind()),
        }
    }
}

macro_rules! integer_kinds {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// An integer scalar tagged with its declared width and signedness.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Integer {
            $($variant($ty),)*
        }

        impl Integer {
            /// Whether the integer is zero.
            pub fn is_zero(&self) -> bool {
                match self {
                    $(Integer::$variant(v) => *v == 0,)*
                }
            }

            /// Width of the encoded form in bytes.
            pub fn width(&self) -> usize {
                match self {
                    $(Integer::$variant(_) => std::mem::size_of::<$ty>(),)*
                }
            }

            /// Write the little-endian encoding at the declared width.
            pub fn write_le<S: Update + ?Sized>(&self, sink: &mut S) {
                match self {
                    $(Integer::$variant(v) => sink.update(&v.to_le_bytes()),)*
                }
            }
        }

        $(
            impl From<$ty> for Integer {
                fn from(value: $ty) -> Self {
                    Integer::$variant(value)
                }
            }
        )*
    };
}

integer_kinds! {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
}

/// A floating-point scalar tagged with its declared width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Float {
    F32(f32),
    F64(f64),
}

impl Float {
    /// Whether the float is zero. Only an all-zero bit pattern counts, so
    /// `-0.0` and NaN are non-zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Float::F32(v) => v.to_bits() == 0,
            Float::F64(v) => v.to_bits() == 0,
        }
    }

    /// Write the little-endian IEEE-754 bits at the declared width.
    pub fn write_le<S: Update + ?Sized>(&self, sink: &mut S) {
        match self {
            Float::F32(v) => sink.update(&v.to_le_bytes()),
            Float::F64(v) => sink.update(&v.to_le_bytes()),
        }
    }
}

impl From<f32> for Float {
    fn from(value: f32) -> Self {
        Float::F32(value)
    }
}

impl From<f64> for Float {
    fn from(value: f64) -> Self {
        Float::F64(value)
    }
}

//! `AnyHash` for scalars and references.
//!
//! `Option<T>` is the one absent-able reference: `None` is zero, while
//! `Some(v)` is never zero even if `v` is, so a record field holding
//! `Some("")` still emits its name. Every other pointer type (`&T`, `Box`,
//! `Rc`, `Arc`, `Cow`) is always present and fully transparent: it has the
//! shape and the zero-ness of its target, so indirection depth never shows
//! in the output.

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

use crate::record::{Field, Record};
use crate::shape::{AnyHash, Float, Integer, Shape};

impl AnyHash for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Text(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl AnyHash for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Text(self.as_str())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {
        $(
            impl AnyHash for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Int(Integer::from(*self))
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

// Pointer-sized integers are widened to 64 bits so the encoding does not
// depend on the target platform.
impl AnyHash for isize {
    fn shape(&self) -> Shape<'_> {
        Shape::Int(Integer::I64(*self as i64))
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl AnyHash for usize {
    fn shape(&self) -> Shape<'_> {
        Shape::Int(Integer::U64(*self as u64))
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl AnyHash for f32 {
    fn shape(&self) -> Shape<'_> {
        Shape::Float(Float::F32(*self))
    }
}

impl AnyHash for f64 {
    fn shape(&self) -> Shape<'_> {
        Shape::Float(Float::F64(*self))
    }
}

impl AnyHash for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Bool(*self)
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

impl AnyHash for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Reference(None)
    }

    fn is_zero(&self) -> bool {
        true
    }
}

impl<T: AnyHash> AnyHash for Option<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Reference(self.as_ref().map(|value| value as &dyn AnyHash))
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

macro_rules! impl_transparent {
    ($($ptr:ty),*) => {
        $(
            impl<T: AnyHash + ?Sized> AnyHash for $ptr {
                fn shape(&self) -> Shape<'_> {
                    (**self).shape()
                }

                fn is_zero(&self) -> bool {
                    (**self).is_zero()
                }
            }
        )*
    };
}

impl_transparent!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

impl<B> AnyHash for Cow<'_, B>
where
    B: AnyHash + ToOwned + ?Sized,
{
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

// A `char` has no borrowed text to point at, so it supplies its UTF-8
// bytes through the record hook.
impl AnyHash for char {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(self)
    }

    fn is_zero(&self) -> bool {
        *self == '\0'
    }
}

impl Record for char {
    fn fields(&self) -> Vec<Field<'_>> {
        Vec::new()
    }

    fn canonical_bytes(&self) -> Option<Vec<u8>> {
        let mut buf = [0u8; 4];
        Some(self.encode_utf8(&mut buf).as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Canonicalizer;

    fn stream<T: AnyHash + ?Sized>(value: &T) -> Vec<u8> {
        Canonicalizer::default().stream(value).unwrap().into_bytes()
    }

    #[test]
    fn test_integers_use_declared_width() {
        assert_eq!(stream(&1i8), vec![1]);
        assert_eq!(stream(&1u32), vec![1, 0, 0, 0]);
        assert_eq!(stream(&-1i64), vec![0xff; 8]);
        assert_eq!(stream(&1u128).len(), 16);
    }

    #[test]
    fn test_pointer_sized_integers_are_64_bit() {
        assert_eq!(stream(&5usize), 5u64.to_le_bytes().to_vec());
        assert_eq!(stream(&-5isize), (-5i64).to_le_bytes().to_vec());
    }

    #[test]
    fn test_negative_zero_float_is_encoded() {
        assert_eq!(stream(&-0.0f64), (-0.0f64).to_le_bytes().to_vec());
        assert!(stream(&0.0f32).is_empty());
    }

    #[test]
    fn test_char_is_utf8_text() {
        assert_eq!(stream(&'é'), "é".as_bytes().to_vec());
        assert_eq!(stream(&('a', 'b')), stream("ab"));
        assert!('\0'.is_zero());
    }

    #[test]
    fn test_option_presence() {
        assert!(Option::<String>::None.is_zero());
        assert!(!Some(String::new()).is_zero());
        assert!(stream(&Some(String::new())).is_empty());
        assert_eq!(stream(&Some("x")), b"x".to_vec());
    }

    #[test]
    fn test_indirection_is_transparent() {
        let plain = "value".to_string();
        let boxed = Box::new(plain.clone());
        let shared = Rc::new(Box::new(plain.clone()));
        let atomic = Arc::new(&plain);
        let cow: Cow<'_, str> = Cow::Borrowed("value");
        assert_eq!(stream(&plain), stream(&boxed));
        assert_eq!(stream(&plain), stream(&shared));
        assert_eq!(stream(&plain), stream(&atomic));
        assert_eq!(stream(&plain), stream(&cow));
        assert!(Box::new(String::new()).is_zero());
    }

    #[test]
    fn test_unit_is_zero() {
        assert!(().is_zero());
        assert!(stream(&()).is_empty());
    }
}

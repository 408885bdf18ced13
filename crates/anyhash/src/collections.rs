//! `AnyHash` for sequences and maps.
//!
//! Growable sequences and maps are zero when empty. Fixed-size arrays and
//! tuples are value types: they are zero when every element is zero.

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::shape::{AnyHash, Shape};

impl<T: AnyHash> AnyHash for [T] {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(Box::new(self.iter().map(|value| value as &dyn AnyHash)))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: AnyHash> AnyHash for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        self.as_slice().shape()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: AnyHash> AnyHash for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(Box::new(self.iter().map(|value| value as &dyn AnyHash)))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: AnyHash, const N: usize> AnyHash for [T; N] {
    fn shape(&self) -> Shape<'_> {
        self.as_slice().shape()
    }

    fn is_zero(&self) -> bool {
        self.iter().all(AnyHash::is_zero)
    }
}

impl<K: AnyHash, V: AnyHash, H> AnyHash for HashMap<K, V, H> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(Box::new(
            self.iter()
                .map(|(key, value)| (key as &dyn AnyHash, value as &dyn AnyHash)),
        ))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K: AnyHash, V: AnyHash> AnyHash for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(Box::new(
            self.iter()
                .map(|(key, value)| (key as &dyn AnyHash, value as &dyn AnyHash)),
        ))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! impl_tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: AnyHash),+> AnyHash for ($($name,)+) {
            fn shape(&self) -> Shape<'_> {
                let elements = [$(&self.$idx as &dyn AnyHash),+];
                Shape::Sequence(Box::new(elements.into_iter()))
            }

            fn is_zero(&self) -> bool {
                true $(&& self.$idx.is_zero())+
            }
        }
    };
}

impl_tuple!(A.0);
impl_tuple!(A.0, B.1);
impl_tuple!(A.0, B.1, C.2);
impl_tuple!(A.0, B.1, C.2, D.3);
impl_tuple!(A.0, B.1, C.2, D.3, E.4);
impl_tuple!(A.0, B.1, C.2, D.3, E.4, F.5);
impl_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6);
impl_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Canonicalizer;

    fn stream<T: AnyHash + ?Sized>(value: &T) -> Vec<u8> {
        Canonicalizer::default().stream(value).unwrap().into_bytes()
    }

    #[test]
    fn test_byte_vector_is_raw_bytes() {
        assert_eq!(stream(&vec![1u8, 2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn test_zero_elements_are_elided() {
        assert_eq!(stream(&vec![1u8, 0, 2]), stream(&vec![1u8, 2]));
    }

    #[test]
    fn test_slice_vec_and_deque_agree() {
        let items = vec!["x".to_string(), "y".to_string()];
        let deque: VecDeque<String> = items.iter().cloned().collect();
        assert_eq!(stream(&items), stream(items.as_slice()));
        assert_eq!(stream(&items), stream(&deque));
    }

    #[test]
    fn test_array_zero_means_all_elements_zero() {
        assert!([0u8; 4].is_zero());
        assert!(![0u8, 0, 1, 0].is_zero());
        assert!(Vec::<u8>::new().is_zero());
        assert!(!vec![0u8].is_zero());
    }

    #[test]
    fn test_tuple_is_a_sequence() {
        assert_eq!(stream(&("a", 1u8, true)), vec![b'a', 1, 1]);
        assert!(("", 0u8).is_zero());
    }

    #[test]
    fn test_hash_and_btree_maps_agree() {
        let mut hashed = HashMap::new();
        let mut sorted = BTreeMap::new();
        for (key, value) in [("one", 1u32), ("two", 2), ("three", 3)] {
            hashed.insert(key, value);
            sorted.insert(key, value);
        }
        assert_eq!(stream(&hashed), stream(&sorted));
    }

    #[test]
    fn test_composite_map_keys() {
        let mut first = HashMap::new();
        first.insert(vec!["a", "b"], "ab");
        first.insert(vec!["c"], "c");
        let mut second = HashMap::new();
        second.insert(vec!["c"], "c");
        second.insert(vec!["a", "b"], "ab");
        assert_eq!(stream(&first), stream(&second));
        assert_eq!(stream(&first).len(), 16 + 2 + 16 + 1);
    }
}

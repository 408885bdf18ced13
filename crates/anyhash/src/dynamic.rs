//! Dynamic values whose static type hides the concrete runtime type.
//!
//! `dyn AnyHash` needs nothing extra: the trait object dispatches to the
//! concrete type, and every pointer to it is transparent. `dyn Any` is
//! resolved by downcasting to the built-in scalar types; anything else
//! cannot be inspected and contributes nothing.

use std::any::Any;

use crate::shape::{AnyHash, Shape};

/// Resolve an opaque value to one of the built-in scalar types.
fn resolve(value: &dyn Any) -> Option<&dyn AnyHash> {
    macro_rules! downcast {
        ($($ty:ty),* $(,)?) => {
            $(
                if let Some(concrete) = value.downcast_ref::<$ty>() {
                    return Some(concrete);
                }
            )*
        };
    }

    downcast!(
        String,
        &'static str,
        bool,
        i8,
        i16,
        i32,
        i64,
        i128,
        isize,
        u8,
        u16,
        u32,
        u64,
        u128,
        usize,
        f32,
        f64,
        Vec<u8>,
        Vec<String>,
    );
    None
}

macro_rules! impl_any {
    ($($object:ty),*) => {
        $(
            impl AnyHash for $object {
                fn shape(&self) -> Shape<'_> {
                    Shape::Dynamic(resolve(self))
                }
            }
        )*
    };
}

impl_any!(dyn Any, dyn Any + Send, dyn Any + Send + Sync);

//! `AnyHash` for `serde_json` documents.
//!
//! JSON has no declared widths, so integers are always encoded as 8-byte
//! `i64` (or `u64` above `i64::MAX`) and all other numbers as `f64`. `null`
//! is an absent reference.

use serde_json::{Map, Number, Value};

use crate::shape::{AnyHash, Float, Integer, Shape};

fn number_shape(number: &Number) -> Shape<'_> {
    if let Some(int) = number.as_i64() {
        Shape::Int(Integer::I64(int))
    } else if let Some(uint) = number.as_u64() {
        Shape::Int(Integer::U64(uint))
    } else if let Some(float) = number.as_f64() {
        Shape::Float(Float::F64(float))
    } else {
        Shape::Other(number.to_string())
    }
}

impl AnyHash for Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            Value::Null => Shape::Reference(None),
            Value::Bool(flag) => Shape::Bool(*flag),
            Value::Number(number) => number_shape(number),
            Value::String(text) => Shape::Text(text),
            Value::Array(items) => items.shape(),
            Value::Object(map) => map.shape(),
        }
    }
}

impl AnyHash for Map<String, Value> {
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

//! Hashing for `sea_query::Value`.
//!
//! `Value` only offers `PartialEq`, but relation keys must live in hash maps.
//! The hash below agrees with that equality: the variant is always part of the
//! hash (`Int(1)` and `BigInt(1)` are different values), floats hash by bit
//! pattern with the two zeros folded together.

use sea_query::Value;
use std::hash::{Hash, Hasher};

/// Feed `value` into `state`.
pub fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    std::mem::discriminant(value).hash(state);
    match value {
        Value::Bool(v) => v.hash(state),
        Value::TinyInt(v) => v.hash(state),
        Value::SmallInt(v) => v.hash(state),
        Value::Int(v) => v.hash(state),
        Value::BigInt(v) => v.hash(state),
        Value::TinyUnsigned(v) => v.hash(state),
        Value::SmallUnsigned(v) => v.hash(state),
        Value::Unsigned(v) => v.hash(state),
        Value::BigUnsigned(v) => v.hash(state),
        Value::Float(v) => v.map(|f| if f == 0.0 { 0 } else { f.to_bits() }).hash(state),
        Value::Double(v) => v.map(|d| if d == 0.0 { 0 } else { d.to_bits() }).hash(state),
        Value::String(v) => v.hash(state),
        Value::Char(v) => v.hash(state),
        Value::Bytes(v) => v.hash(state),
        other => format!("{other:?}").hash(state),
    }
}

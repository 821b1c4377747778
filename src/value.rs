//! Field Values
//!
//! Raw and normalized field values are plain JSON values, so a form can carry
//! text, numbers, booleans or nested data without the engine caring.

use std::collections::BTreeMap;

pub use serde_json::Value;

/// A mapping of field name to value, iterated in key order.
///
/// Insertion order is not kept, which also fixes alias collision precedence
/// (see [`crate::engine::resolve_aliases`]).
pub type FieldMap = BTreeMap<String, Value>;

/// Value used for a declared field that the input does not contain.
pub fn absent() -> Value {
    Value::String(String::new())
}

/// Emptiness test behind the required check.
///
/// `Null` and blank strings are empty. Numbers, booleans and containers never are.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

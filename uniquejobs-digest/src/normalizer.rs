//! Canonicalization of argument values.
//!
//! The same logical argument can arrive with different in-memory shapes
//! (most commonly object keys in different orders, depending on how the
//! value was built). Hashing requires a single serialized representation,
//! so objects are rebuilt with their keys in sorted order before anything
//! downstream sees them. Arrays recurse element-wise; scalars pass through.

use serde::Serialize;
use serde_json::{Map, Value};

/// Canonicalize a single value.
pub fn normalize_value(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(normalize_value).collect()),
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut out = Map::new();
            for (key, value) in entries {
                out.insert(key.clone(), normalize_value(value));
            }
            Value::Object(out)
        }
        scalar => scalar.clone(),
    }
}

/// Canonicalize an argument sequence.
pub fn normalize_args(args: &[Value]) -> Vec<Value> {
    args.iter().map(normalize_value).collect()
}

/// Admit an arbitrary serializable value at the boundary and canonicalize it.
pub fn normalize<T: Serialize>(value: &T) -> Result<Value, serde_json::Error> {
    Ok(normalize_value(&serde_json::to_value(value)?))
}

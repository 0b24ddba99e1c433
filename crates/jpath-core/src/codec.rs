//! Parse and serialize boundary — bytes/text to [`Value`] and back.
//!
//! The grammar-level JSON parsing itself is delegated to `serde_json` (built
//! with `preserve_order`, so object insertion order survives). This module
//! owns the conversion between `serde_json::Value` and the tagged [`Value`]
//! model, keeping the Integer/Double distinction intact: a numeric literal
//! without a fraction or exponent arrives as `Integer`, anything else as
//! `Double`, and that tag round-trips through [`serialize`].

use crate::error::Result;
use crate::value::Value;
use serde_json::{Map, Value as RawValue};

/// Parse a JSON document from raw bytes.
///
/// Accepts any syntactically valid JSON document (objects, arrays, strings
/// with standard escapes, numbers with optional fraction/exponent,
/// `true`/`false`/`null`). Malformed input fails with a position-bearing
/// parse error; no partial document is ever returned.
pub fn parse(bytes: &[u8]) -> Result<Value> {
    let raw: RawValue = serde_json::from_slice(bytes)?;
    Ok(from_raw(raw))
}

/// Parse a JSON document from a string slice.
pub fn parse_str(text: &str) -> Result<Value> {
    let raw: RawValue = serde_json::from_str(text)?;
    Ok(from_raw(raw))
}

/// Serialize a value to compact JSON bytes.
///
/// Deterministic and round-trip compatible with [`parse`]:
/// `parse(&serialize(v)?)` is structurally equal to `v` for every value
/// without non-finite doubles. NaN and infinity have no JSON representation
/// and serialize as `null`.
pub fn serialize(value: &Value) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&to_raw(value))?)
}

/// Serialize a value to a compact JSON string.
pub fn to_json_string(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(&to_raw(value))?)
}

/// Serialize a value to pretty-printed JSON (2-space indent).
pub fn to_json_string_pretty(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_raw(value))?)
}

/// Convert a parsed `serde_json` tree into the tagged value model.
fn from_raw(raw: RawValue) -> Value {
    match raw {
        RawValue::Null => Value::Null,
        RawValue::Bool(b) => Value::Boolean(b),
        RawValue::Number(n) => {
            // Integer when the literal had no fraction/exponent and fits i64;
            // u64 values above i64::MAX fall through to Double.
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Double(f)
            } else {
                Value::Null
            }
        }
        RawValue::String(s) => Value::String(s),
        RawValue::Array(items) => Value::Array(items.into_iter().map(from_raw).collect()),
        RawValue::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, from_raw(value)))
                .collect(),
        ),
    }
}

/// Convert a value tree back into a `serde_json` tree for serialization.
fn to_raw(value: &Value) -> RawValue {
    match value {
        Value::Null => RawValue::Null,
        Value::Boolean(b) => RawValue::Bool(*b),
        Value::Integer(i) => RawValue::Number((*i).into()),
        Value::Double(d) => match serde_json::Number::from_f64(*d) {
            Some(n) => RawValue::Number(n),
            // NaN / infinity normalize to null
            None => RawValue::Null,
        },
        Value::String(s) => RawValue::String(s.clone()),
        Value::Array(items) => RawValue::Array(items.iter().map(to_raw).collect()),
        Value::Object(pairs) => {
            let mut map = Map::with_capacity(pairs.len());
            for (key, value) in pairs {
                map.insert(key.clone(), to_raw(value));
            }
            RawValue::Object(map)
        }
    }
}

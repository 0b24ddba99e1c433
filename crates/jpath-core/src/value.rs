//! The JSON value model.
//!
//! [`Value`] is an immutable tagged representation of a parsed JSON document.
//! It mirrors the JSON types but separates integers from doubles (the
//! distinction survives a serialize/parse round trip) and uses
//! `Vec<(String, Value)>` for objects to maintain insertion order without
//! depending on `IndexMap`.
//!
//! Two accessor families coexist by design:
//!
//! - **Strict** accessors (`as_boolean`, `as_integer`, ...) return `Option`
//!   and are the type-checked path: pair them with [`Value::kind`].
//! - **Lenient** accessors (`boolean_value`, `integer_value`, ...) return a
//!   documented default (`false` / `0` / `0.0` / `""`) on a variant mismatch
//!   instead of an error. This mirrors the loosely-typed host convention the
//!   model was designed to back, and is part of the public contract.

/// The seven JSON variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Boolean,
    Integer,
    Double,
    String,
    Array,
    Object,
}

/// An immutable JSON value.
///
/// The variant never changes after construction; "mutation" means building a
/// new `Value`. Arrays and objects exclusively own their children, so a JSON
/// tree is a plain acyclic ownership tree and needs no cycle handling.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Array(Vec<Value>),
    /// Key-value pairs in insertion order. Keys are unique; build through
    /// [`Value::object`] to get last-write-wins deduplication.
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Build an array value from any sequence of values.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Array(items.into_iter().collect())
    }

    /// Build an object value from key-value pairs, preserving first-insertion
    /// order. A duplicate key replaces the earlier value in place (last write
    /// wins).
    pub fn object<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut entries: Vec<(String, Value)> = Vec::new();
        for (key, value) in pairs {
            let key = key.into();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => entries.push((key, value)),
            }
        }
        Value::Object(entries)
    }

    /// The variant tag of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Boolean(_) => Kind::Boolean,
            Value::Integer(_) => Kind::Integer,
            Value::Double(_) => Kind::Double,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    // ------------------------------------------------------------------
    // Strict accessors: Some only when the variant matches.
    // ------------------------------------------------------------------

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Object(pairs) => Some(pairs),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Lenient accessors: documented defaults on a variant mismatch.
    // ------------------------------------------------------------------

    /// The boolean payload, or `false` for any other variant.
    pub fn boolean_value(&self) -> bool {
        self.as_boolean().unwrap_or(false)
    }

    /// The integer payload, or `0` for any other variant.
    pub fn integer_value(&self) -> i64 {
        self.as_integer().unwrap_or(0)
    }

    /// The double payload, or `0.0` for any other variant.
    pub fn double_value(&self) -> f64 {
        self.as_double().unwrap_or(0.0)
    }

    /// The string payload, or `""` for any other variant.
    pub fn string_value(&self) -> &str {
        self.as_str().unwrap_or("")
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// The value under `key` if this is an object containing it.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(pairs) => pairs.iter().find(|(k, _)| k.as_str() == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// The element at `index` if this is an array and the index is in range.
    /// Negative indices count from the end (`-1` is the last element).
    pub fn at(&self, index: i64) -> Option<&Value> {
        let items = self.as_array()?;
        let len = items.len() as i64;
        let idx = if index < 0 { index + len } else { index };
        if idx < 0 || idx >= len {
            return None;
        }
        items.get(idx as usize)
    }
}

/// Structural equality. Object comparison ignores key order but not key set
/// or per-key values. `Integer` and `Double` are distinct variants and never
/// equal each other here (query filters apply numeric coercion separately).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, value)| other.get(key) == Some(value))
            }
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

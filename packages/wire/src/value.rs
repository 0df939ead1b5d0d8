//! The Value type - a tree-shaped wire value.
//!
//! Every payload the transport hands to the codec layer arrives as a `Value`,
//! and every encoded message leaves as one. It maps directly to JSON but does
//! not depend on any particular byte encoding.

use std::collections::BTreeMap;
use std::fmt;

/// Object body of a `Value::Map`.
pub type Map = BTreeMap<String, Value>;

/// A tree-shaped value moved between the transport and the codec.
///
/// # Design Notes
///
/// - Uses `BTreeMap` for deterministic ordering (important for comparison and
///   stable encoded output)
/// - Uses `i64` for integers; larger JSON numbers degrade to `Float`
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Explicit JSON `null`. Codecs treat it like an absent field.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// Key-value map with string keys.
    Map(Map),
}

/// The primitive kind of a `Value`, without its payload.
///
/// Used in diagnostics ("expected string, found integer").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Array,
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Map => "object",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Create a null value.
    pub fn null() -> Self {
        Value::Null
    }

    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(Map::new())
    }

    /// Create an empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// The primitive kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Map(_) => ValueKind::Map,
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is a map (object).
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Check if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Look up a direct child of a map.
    ///
    /// Returns `None` for missing keys and for non-map values.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Integer as `u64`; negative integers yield `None`.
    pub fn as_u64(&self) -> Option<u64> {
        self.as_i64().and_then(|i| u64::try_from(i).ok())
    }

    /// Numeric value as `f64`, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Insert into a map value, returning the previous child.
    ///
    /// Non-map values are replaced by a fresh map first.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        if !self.is_map() {
            *self = Value::map();
        }
        match self {
            Value::Map(map) => map.insert(key.into(), value.into()),
            _ => None,
        }
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;

    #[test]
    fn get_reads_direct_children() {
        let value = Value::Map(btree! {
            "account".into() => Value::from("rABC"),
            "flags".into() => Value::from(0i64),
        });

        assert_eq!(value.get("account"), Some(&Value::from("rABC")));
        assert_eq!(value.get("missing"), None);
        assert_eq!(Value::from("scalar").get("account"), None);
    }

    #[test]
    fn kind_names_match_json_vocabulary() {
        assert_eq!(Value::map().kind().to_string(), "object");
        assert_eq!(Value::from(1i64).kind().to_string(), "integer");
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::array().kind(), ValueKind::Array);
    }

    #[test]
    fn numeric_accessors() {
        assert_eq!(Value::from(7i64).as_u64(), Some(7));
        assert_eq!(Value::from(-7i64).as_u64(), None);
        assert_eq!(Value::from(7i64).as_f64(), Some(7.0));
        assert_eq!(Value::from("7").as_i64(), None);
    }

    #[test]
    fn insert_replaces_scalars_with_map() {
        let mut value = Value::from(true);
        assert_eq!(value.insert("a", 1i64), None);
        assert_eq!(value.insert("a", 2i64), Some(Value::from(1i64)));
        assert_eq!(value.get("a"), Some(&Value::from(2i64)));
    }

    #[test]
    fn vec_conversion() {
        let value = Value::from(vec!["a", "b"]);
        assert_eq!(
            value.as_array(),
            Some(&[Value::from("a"), Value::from("b")][..])
        );
    }
}

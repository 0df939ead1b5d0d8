//! Conversions between Value, serde_json and serde types.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Error, Value};

/// Convert a Value to a Rust type via serde.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    let json = value_to_json(value);
    serde_json::from_value(json).map_err(|e| Error::decode(e.to_string()))
}

/// Convert a Rust type to a Value via serde.
///
/// Accepts unsized types so that serializable trait objects can be converted
/// directly.
pub fn to_value<T: Serialize + ?Sized>(data: &T) -> Result<Value, Error> {
    let json = serde_json::to_value(data).map_err(|e| Error::encode(e.to_string()))?;
    Ok(json_to_value(json))
}

/// Convert our Value to serde_json::Value.
pub fn value_to_json(value: Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
        Value::Array(arr) => serde_json::Value::Array(arr.into_iter().map(value_to_json).collect()),
        Value::Map(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, value_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert serde_json::Value to our Value.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                // Fallback for very large numbers
                Value::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (k, json_to_value(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Memo {
        memo_type: String,
        memo_data: Option<String>,
    }

    #[test]
    fn roundtrip_struct() {
        let original = Memo {
            memo_type: "text/plain".to_string(),
            memo_data: Some("68656C6C6F".to_string()),
        };

        let value = to_value(&original).unwrap();
        let recovered: Memo = from_value(value).unwrap();

        assert_eq!(original, recovered);
    }

    #[test]
    fn json_to_value_numbers() {
        let json = serde_json::json!({
            "sequence": 42,
            "quality": 2.75,
            "negative": -100
        });

        let value = json_to_value(json);
        assert_eq!(value.get("sequence"), Some(&Value::Integer(42)));
        assert_eq!(value.get("negative"), Some(&Value::Integer(-100)));
        match value.get("quality") {
            Some(Value::Float(f)) => assert!((f - 2.75).abs() < 0.001),
            other => panic!("expected float, got {:?}", other),
        }
    }

    #[test]
    fn json_to_value_nested() {
        let json = serde_json::json!({"a": [1, "two", true, null], "b": {"c": "d"}});
        let value = json_to_value(json);

        let arr = value.get("a").and_then(Value::as_array).unwrap();
        assert_eq!(arr.len(), 4);
        assert_eq!(arr[1], Value::String("two".to_string()));
        assert_eq!(arr[3], Value::Null);
        assert_eq!(
            value.get("b").and_then(|b| b.get("c")),
            Some(&Value::from("d"))
        );
    }

    #[test]
    fn value_to_json_nan_becomes_null() {
        assert_eq!(value_to_json(Value::Float(f64::NAN)), serde_json::Value::Null);
    }

    #[test]
    fn value_to_json_map() {
        let mut value = Value::map();
        value.insert("key", "value");
        value.insert("num", 42i64);

        assert_eq!(
            value_to_json(value),
            serde_json::json!({"key": "value", "num": 42})
        );
    }

    #[test]
    fn from_value_error() {
        let value = Value::String("not a struct".to_string());
        let result: Result<Memo, _> = from_value(value);
        assert!(matches!(result, Err(Error::Decode { .. })));
    }

    #[test]
    fn to_value_primitives() {
        assert_eq!(to_value(&42i32).unwrap(), Value::Integer(42));
        assert_eq!(
            to_value(&"hello").unwrap(),
            Value::String("hello".to_string())
        );
        assert_eq!(to_value(&None::<u32>).unwrap(), Value::Null);
    }
}

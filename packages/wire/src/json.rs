//! JSON codec implementation.

use bytes::Bytes;

use crate::convert::{json_to_value, value_to_json};
use crate::{Error, Value};

/// A codec that moves between JSON bytes and `Value`.
///
/// # Example
///
/// ```rust
/// use ledgerwire_wire::{JsonCodec, Value};
///
/// let codec = JsonCodec;
/// let value = Value::from("hello");
///
/// let bytes = codec.encode(&value).unwrap();
/// let decoded = codec.decode(&bytes).unwrap();
///
/// assert_eq!(decoded, value);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn decode(&self, bytes: &Bytes) -> Result<Value, Error> {
        self.decode_slice(bytes)
    }

    pub fn decode_slice(&self, bytes: &[u8]) -> Result<Value, Error> {
        let json: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| Error::decode(e.to_string()))?;
        Ok(json_to_value(json))
    }

    pub fn decode_str(&self, text: &str) -> Result<Value, Error> {
        self.decode_slice(text.as_bytes())
    }

    pub fn encode(&self, value: &Value) -> Result<Bytes, Error> {
        let json = value_to_json(value.clone());
        let bytes = serde_json::to_vec(&json).map_err(|e| Error::encode(e.to_string()))?;
        Ok(Bytes::from(bytes))
    }

    /// Encode as indented, human-readable JSON text.
    pub fn encode_pretty(&self, value: &Value) -> Result<String, Error> {
        let json = value_to_json(value.clone());
        serde_json::to_string_pretty(&json).map_err(|e| Error::encode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;

    #[test]
    fn json_codec_roundtrip() {
        let codec = JsonCodec;

        let original = Value::Map(btree! {
            "ledger_entry_type".into() => Value::from("Escrow"),
            "amount".into() => Value::from("100"),
            "flags".into() => Value::Integer(0),
        });

        let bytes = codec.encode(&original).unwrap();
        let decoded = codec.decode(&bytes).unwrap();

        assert_eq!(original, decoded);
    }

    #[test]
    fn json_codec_rejects_garbage() {
        let bytes = Bytes::from_static(b"{not json");
        let result = JsonCodec.decode(&bytes);

        assert!(matches!(result, Err(Error::Decode { .. })));
    }

    #[test]
    fn pretty_output_is_indented() {
        let value = JsonCodec.decode_str(r#"{"a":1}"#).unwrap();
        let text = JsonCodec.encode_pretty(&value).unwrap();
        assert!(text.contains("\n"));
        assert!(text.contains("\"a\": 1"));
    }
}

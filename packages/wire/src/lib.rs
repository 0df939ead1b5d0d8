//! Wire Values for ledgerwire
//!
//! Everything that crosses the transport boundary passes through this crate:
//! - `Value`: the tree-shaped intermediate representation (object/array/scalar)
//! - `JsonCodec`: raw JSON bytes <-> `Value`
//! - `from_value` / `to_value`: `Value` <-> serde types
//!
//! The codec layer (`ledgerwire-codec`) never looks at bytes; it only walks
//! `Value` trees.
//!
//! # Example
//!
//! ```rust
//! use ledgerwire_wire::{JsonCodec, Value};
//!
//! let value = JsonCodec.decode_str(r#"{"account": "rABC"}"#).unwrap();
//! assert_eq!(value.get("account").and_then(Value::as_str), Some("rABC"));
//! ```

pub use bytes::Bytes;

mod convert;
mod error;
mod json;
mod value;

pub use convert::{from_value, json_to_value, to_value, value_to_json};
pub use error::Error;
pub use json::JsonCodec;
pub use value::{Map, Value, ValueKind};

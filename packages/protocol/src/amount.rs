//! Value types shared by several families.

use std::fmt;

use ledgerwire_codec::{serde_wire_field, FieldKind, Map, Value, WireError, WireField};
use serde::{Deserialize, Serialize};

/// A currency amount.
///
/// XRP is written as a string of drops; issued tokens as an object with
/// `currency`, `issuer` and `value`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Xrp(String),
    Token(TokenAmount),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    pub currency: String,
    pub issuer: String,
    pub value: String,
}

impl Amount {
    pub fn xrp(drops: impl Into<String>) -> Self {
        Amount::Xrp(drops.into())
    }

    pub fn token(
        currency: impl Into<String>,
        issuer: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Amount::Token(TokenAmount {
            currency: currency.into(),
            issuer: issuer.into(),
            value: value.into(),
        })
    }

    pub fn is_xrp(&self) -> bool {
        matches!(self, Amount::Xrp(_))
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Xrp("0".to_string())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Xrp(drops) => write!(f, "{} drops", drops),
            Amount::Token(token) => {
                write!(f, "{} {}/{}", token.value, token.currency, token.issuer)
            }
        }
    }
}

impl WireField for Amount {
    const KIND: FieldKind = FieldKind::OneOf(&[FieldKind::String, FieldKind::Object]);

    fn to_wire(&self) -> Result<Value, WireError> {
        Ok(match self {
            Amount::Xrp(drops) => Value::String(drops.clone()),
            Amount::Token(token) => {
                let mut map = Map::new();
                map.insert("currency".to_string(), Value::from(token.currency.as_str()));
                map.insert("issuer".to_string(), Value::from(token.issuer.as_str()));
                map.insert("value".to_string(), Value::from(token.value.as_str()));
                Value::Map(map)
            }
        })
    }

    fn from_wire(value: &Value) -> Option<Self> {
        match value {
            Value::String(drops) => Some(Amount::Xrp(drops.clone())),
            Value::Map(map) => {
                let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
                Some(Amount::Token(TokenAmount {
                    currency: text("currency")?,
                    issuer: text("issuer")?,
                    value: text("value")?,
                }))
            }
            _ => None,
        }
    }
}

/// Which ledger a request or selector refers to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LedgerIndex {
    Number(u32),
    Shortcut(LedgerShortcut),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerShortcut {
    Validated,
    Current,
    Closed,
}

impl LedgerShortcut {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerShortcut::Validated => "validated",
            LedgerShortcut::Current => "current",
            LedgerShortcut::Closed => "closed",
        }
    }

    fn parse(text: &str) -> Option<Self> {
        match text {
            "validated" => Some(LedgerShortcut::Validated),
            "current" => Some(LedgerShortcut::Current),
            "closed" => Some(LedgerShortcut::Closed),
            _ => None,
        }
    }
}

impl Default for LedgerIndex {
    fn default() -> Self {
        LedgerIndex::Shortcut(LedgerShortcut::Validated)
    }
}

impl From<u32> for LedgerIndex {
    fn from(sequence: u32) -> Self {
        LedgerIndex::Number(sequence)
    }
}

impl From<LedgerShortcut> for LedgerIndex {
    fn from(shortcut: LedgerShortcut) -> Self {
        LedgerIndex::Shortcut(shortcut)
    }
}

impl WireField for LedgerIndex {
    const KIND: FieldKind = FieldKind::OneOf(&[FieldKind::Integer, FieldKind::String]);

    fn to_wire(&self) -> Result<Value, WireError> {
        Ok(match self {
            LedgerIndex::Number(sequence) => Value::Integer(i64::from(*sequence)),
            LedgerIndex::Shortcut(shortcut) => Value::from(shortcut.as_str()),
        })
    }

    fn from_wire(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(_) => u32::from_wire(value).map(LedgerIndex::Number),
            Value::String(text) => LedgerShortcut::parse(text).map(LedgerIndex::Shortcut),
            _ => None,
        }
    }
}

/// Arbitrary data attached to a transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_format: Option<String>,
}

/// Identifies an offer by its owner and creating sequence number.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferLocator {
    pub account: String,
    pub seq: u32,
}

/// Identifies an escrow by its owner and creating sequence number.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowLocator {
    pub owner: String,
    pub seq: u32,
}

serde_wire_field! {
    Memo => FieldKind::Object,
    OfferLocator => FieldKind::Object,
    EscrowLocator => FieldKind::Object,
}

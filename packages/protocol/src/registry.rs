//! The protocol's codec registry and name-based access to its families.

use ledgerwire_codec::{CodecConfig, CodecRegistry, Family, RegistryError, Value};
use tracing::debug;

use crate::{Error, LedgerEntry, LedgerObjectSelector, PseudoTransaction, Result, Transaction};

/// Names of every family `protocol_registry` installs.
pub const FAMILY_NAMES: [&str; 4] = [
    LedgerEntry::NAME,
    Transaction::NAME,
    PseudoTransaction::NAME,
    LedgerObjectSelector::NAME,
];

/// Build the sealed registry holding every protocol family.
///
/// Unknown-discriminator policies and the envelope mode come from `config`.
pub fn protocol_registry(config: CodecConfig) -> std::result::Result<CodecRegistry, RegistryError> {
    let mut builder = CodecRegistry::builder();
    builder.config(config);
    builder.known::<LedgerEntry>()?;
    builder.known::<Transaction>()?;
    builder.known::<PseudoTransaction>()?;
    builder.known::<LedgerObjectSelector>()?;

    let registry = builder.build();
    debug!(families = ?registry.families(), "protocol registry ready");
    Ok(registry)
}

/// A decoded value of any protocol family.
///
/// For callers that only learn the family at runtime, e.g. from a command
/// line flag.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    LedgerEntry(LedgerEntry),
    Transaction(Transaction),
    PseudoTransaction(PseudoTransaction),
    Selector(LedgerObjectSelector),
}

impl Message {
    /// Decode `wire` as a member of the family called `family`.
    pub fn decode(registry: &CodecRegistry, family: &str, wire: &Value) -> Result<Self> {
        let message = if family == LedgerEntry::NAME {
            Message::LedgerEntry(registry.decode(wire)?)
        } else if family == Transaction::NAME {
            Message::Transaction(registry.decode(wire)?)
        } else if family == PseudoTransaction::NAME {
            Message::PseudoTransaction(registry.decode(wire)?)
        } else if family == LedgerObjectSelector::NAME {
            Message::Selector(registry.decode(wire)?)
        } else {
            return Err(Error::UnknownFamily {
                name: family.to_string(),
            });
        };
        Ok(message)
    }

    pub fn encode(&self, registry: &CodecRegistry) -> Result<Value> {
        let wire = match self {
            Message::LedgerEntry(value) => registry.encode(value)?,
            Message::Transaction(value) => registry.encode(value)?,
            Message::PseudoTransaction(value) => registry.encode(value)?,
            Message::Selector(value) => registry.encode(value)?,
        };
        Ok(wire)
    }

    pub fn family(&self) -> &'static str {
        match self {
            Message::LedgerEntry(_) => LedgerEntry::NAME,
            Message::Transaction(_) => Transaction::NAME,
            Message::PseudoTransaction(_) => PseudoTransaction::NAME,
            Message::Selector(_) => LedgerObjectSelector::NAME,
        }
    }

    pub fn discriminator(&self) -> Option<&str> {
        match self {
            Message::LedgerEntry(value) => value.discriminator(),
            Message::Transaction(value) => value.discriminator(),
            Message::PseudoTransaction(value) => value.discriminator(),
            Message::Selector(value) => value.discriminator(),
        }
    }

    pub fn is_unrecognized(&self) -> bool {
        match self {
            Message::LedgerEntry(value) => value.is_unrecognized(),
            Message::Transaction(value) => value.is_unrecognized(),
            Message::PseudoTransaction(value) => value.is_unrecognized(),
            Message::Selector(value) => value.is_unrecognized(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerwire_codec::{DecodeError, UnknownPolicy};
    use ledgerwire_wire::json_to_value;
    use serde_json::json;

    #[test]
    fn every_family_installed_and_sealed() {
        let registry = protocol_registry(CodecConfig::default()).unwrap();
        let mut expected = FAMILY_NAMES.to_vec();
        expected.sort_unstable();
        assert_eq!(registry.families(), expected);
        assert!(registry.family::<Transaction>().unwrap().is_sealed());
        assert!(registry.family::<LedgerObjectSelector>().unwrap().is_sealed());
    }

    #[test]
    fn decode_by_name() {
        let registry = protocol_registry(CodecConfig::default()).unwrap();
        let wire = json_to_value(json!({
            "transaction_type": "SetFee",
            "base_fee": "A",
            "reference_fee_units": 10,
            "reserve_base": 10000000,
            "reserve_increment": 2000000,
        }));

        let message = Message::decode(&registry, "pseudo-transaction", &wire).unwrap();
        assert_eq!(message.family(), "pseudo-transaction");
        assert_eq!(message.discriminator(), Some("SetFee"));
        assert_eq!(message.encode(&registry).unwrap(), wire);
    }

    #[test]
    fn unknown_family_name() {
        let registry = protocol_registry(CodecConfig::default()).unwrap();
        assert!(matches!(
            Message::decode(&registry, "validation", &Value::Null),
            Err(Error::UnknownFamily { name }) if name == "validation"
        ));
    }

    #[test]
    fn configured_policy_applies() {
        let config = CodecConfig::default().with_policy("transaction", UnknownPolicy::Strict);
        let registry = protocol_registry(config).unwrap();
        let wire = json_to_value(json!({
            "transaction_type": "Clawback",
            "account": "rIssuer",
        }));

        assert!(matches!(
            Message::decode(&registry, "transaction", &wire),
            Err(Error::Codec(ledgerwire_codec::Error::Decode(
                DecodeError::UnknownDiscriminator { .. }
            )))
        ));

        let wire = json_to_value(json!({
            "ledger_entry_type": "Clawback",
        }));
        let message = Message::decode(&registry, "ledger entry", &wire).unwrap();
        assert!(message.is_unrecognized());
    }
}

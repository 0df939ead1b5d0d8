//! Ledger entries: the objects stored in a ledger's state tree.
//!
//! Tagged by `ledger_entry_type`. Entry types this build does not know decode
//! to `LedgerEntry::Unrecognized` carrying the common fields.

use ledgerwire_codec::{family, field, Field, Shape, TagConvention};

use crate::Amount;

/// Fields every ledger entry carries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LedgerEntryCommon {
    pub account: Option<String>,
    /// Object ID of the entry.
    pub index: Option<String>,
    pub flags: Option<u32>,
}

impl Shape for LedgerEntryCommon {
    fn fields() -> Vec<Field<Self>> {
        vec![
            field!(optional account),
            field!(optional index),
            field!(optional flags),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountRoot {
    pub common: LedgerEntryCommon,
    pub balance: Amount,
    pub sequence: u32,
    pub owner_count: Option<u32>,
    pub domain: Option<String>,
}

impl Shape for AccountRoot {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.extend([
            field!(required balance),
            field!(required sequence),
            field!(optional owner_count),
            field!(optional domain),
        ]);
        fields
    }
}

/// Funds held until a time or condition releases them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Escrow {
    pub common: LedgerEntryCommon,
    pub amount: Amount,
    pub destination: Option<String>,
    pub finish_after: Option<u32>,
    pub cancel_after: Option<u32>,
    pub condition: Option<String>,
}

impl Shape for Escrow {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.extend([
            field!(required amount),
            field!(optional destination),
            field!(optional finish_after),
            field!(optional cancel_after),
            field!(optional condition),
        ]);
        fields
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Offer {
    pub common: LedgerEntryCommon,
    pub taker_pays: Amount,
    pub taker_gets: Amount,
    pub sequence: Option<u32>,
    pub expiration: Option<u32>,
}

impl Shape for Offer {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.extend([
            field!(required taker_pays),
            field!(required taker_gets),
            field!(optional sequence),
            field!(optional expiration),
        ]);
        fields
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Check {
    pub common: LedgerEntryCommon,
    pub destination: String,
    pub send_max: Amount,
    pub sequence: Option<u32>,
    pub expiration: Option<u32>,
}

impl Shape for Check {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.extend([
            field!(required destination),
            field!(required send_max),
            field!(optional sequence),
            field!(optional expiration),
        ]);
        fields
    }
}

family! {
    pub enum LedgerEntry {
        name: "ledger entry",
        base: LedgerEntryCommon,
        tag: TagConvention::Field("ledger_entry_type"),
        variants: {
            AccountRoot(AccountRoot) = "AccountRoot",
            Escrow(Escrow) = "Escrow",
            Offer(Offer) = "Offer",
            Check(Check) = "Check",
        }
    }
}

impl LedgerEntry {
    /// The common fields, whichever shape this entry decoded to.
    pub fn common(&self) -> &LedgerEntryCommon {
        match self {
            LedgerEntry::AccountRoot(entry) => &entry.common,
            LedgerEntry::Escrow(entry) => &entry.common,
            LedgerEntry::Offer(entry) => &entry.common,
            LedgerEntry::Check(entry) => &entry.common,
            LedgerEntry::Unrecognized(entry) => &entry.base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerwire_codec::{
        DecodeError, DiscriminatedCodec, Family, FieldKind, UnknownPolicy, Value, VariantRegistry,
    };
    use ledgerwire_wire::json_to_value;
    use serde_json::json;

    fn registry() -> VariantRegistry<LedgerEntry> {
        VariantRegistry::with_known().unwrap()
    }

    #[test]
    fn known_entries_are_registered() {
        let registry = registry();
        assert!(registry.is_sealed());
        assert_eq!(
            registry.discriminators().collect::<Vec<_>>(),
            ["AccountRoot", "Escrow", "Offer", "Check"]
        );
    }

    #[test]
    fn account_root_decodes() {
        let registry = registry();
        let codec = DiscriminatedCodec::new(&registry, UnknownPolicy::Strict);
        let wire = json_to_value(json!({
            "ledger_entry_type": "AccountRoot",
            "account": "rAlice",
            "balance": "250000000",
            "sequence": 12,
            "flags": 0,
        }));

        let entry = codec.decode(&wire).unwrap();
        let LedgerEntry::AccountRoot(root) = &entry else {
            panic!("expected AccountRoot, got {:?}", entry);
        };
        assert_eq!(root.balance, Amount::xrp("250000000"));
        assert_eq!(root.sequence, 12);
        assert_eq!(root.common.flags, Some(0));
        assert_eq!(entry.common().account.as_deref(), Some("rAlice"));
    }

    #[test]
    fn offer_with_token_side() {
        let registry = registry();
        let codec = DiscriminatedCodec::new(&registry, UnknownPolicy::Strict);
        let wire = json_to_value(json!({
            "ledger_entry_type": "Offer",
            "account": "rBob",
            "taker_pays": {"currency": "USD", "issuer": "rGate", "value": "10"},
            "taker_gets": "5000000",
        }));

        let entry = codec.decode(&wire).unwrap();
        let offer = entry.downcast_ref::<Offer>().unwrap();
        assert_eq!(offer.taker_pays, Amount::token("USD", "rGate", "10"));
        assert_eq!(codec.encode(&entry).unwrap(), wire);
    }

    #[test]
    fn amount_of_wrong_kind_is_a_mismatch() {
        let registry = registry();
        let codec = DiscriminatedCodec::new(&registry, UnknownPolicy::Strict);
        let wire = json_to_value(json!({
            "ledger_entry_type": "Escrow",
            "amount": 100,
        }));

        assert_eq!(
            codec.decode(&wire).unwrap_err(),
            DecodeError::FieldTypeMismatch {
                family: "ledger entry",
                shape: "Escrow".to_string(),
                field: "amount",
                expected: FieldKind::OneOf(&[FieldKind::String, FieldKind::Object]),
                found: ledgerwire_codec::ValueKind::Integer,
            }
        );
    }

    #[test]
    fn unknown_entry_keeps_common_fields() {
        let registry = registry();
        let codec = DiscriminatedCodec::new(&registry, UnknownPolicy::FallbackToBase);
        let wire = json_to_value(json!({
            "ledger_entry_type": "NFTokenPage",
            "index": "ABCD",
            "flags": 0,
            "nftokens": [],
        }));

        let entry = codec.decode(&wire).unwrap();
        assert!(entry.is_unrecognized());
        assert_eq!(entry.discriminator(), Some("NFTokenPage"));
        assert_eq!(entry.common().index.as_deref(), Some("ABCD"));

        // Properties outside the common contract are not preserved.
        let encoded = codec.encode(&entry).unwrap();
        assert_eq!(encoded.get("nftokens"), None);
        assert_eq!(encoded.get("ledger_entry_type"), Some(&Value::from("NFTokenPage")));
    }
}

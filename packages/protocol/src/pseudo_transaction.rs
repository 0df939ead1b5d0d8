//! Pseudo-transactions: ledger-level changes applied by validators rather than
//! signed by an account. They share the `transaction_type` tag with ordinary
//! transactions but form their own family with a smaller base contract.

use ledgerwire_codec::{family, field, Field, Shape, TagConvention};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PseudoTransactionCommon {
    /// Always the zero account when present.
    pub account: Option<String>,
    pub ledger_sequence: Option<u32>,
    pub flags: Option<u32>,
}

impl Shape for PseudoTransactionCommon {
    fn fields() -> Vec<Field<Self>> {
        vec![
            field!(optional account),
            field!(optional ledger_sequence),
            field!(optional flags),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnableAmendment {
    pub common: PseudoTransactionCommon,
    /// Amendment ID, hex.
    pub amendment: String,
}

impl Shape for EnableAmendment {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.push(field!(required amendment));
        fields
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetFee {
    pub common: PseudoTransactionCommon,
    pub base_fee: String,
    pub reference_fee_units: u32,
    pub reserve_base: u32,
    pub reserve_increment: u32,
}

impl Shape for SetFee {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.extend([
            field!(required base_fee),
            field!(required reference_fee_units),
            field!(required reserve_base),
            field!(required reserve_increment),
        ]);
        fields
    }
}

/// Toggle a validator on the negative UNL.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnlModify {
    pub common: PseudoTransactionCommon,
    /// 1 to disable the validator, 0 to re-enable it.
    pub unl_modify_disabling: u8,
    pub unl_modify_validator: String,
}

impl Shape for UnlModify {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.extend([
            field!(required unl_modify_disabling),
            field!(required unl_modify_validator),
        ]);
        fields
    }
}

family! {
    pub enum PseudoTransaction {
        name: "pseudo-transaction",
        base: PseudoTransactionCommon,
        tag: TagConvention::Field("transaction_type"),
        variants: {
            EnableAmendment(EnableAmendment) = "EnableAmendment",
            SetFee(SetFee) = "SetFee",
            UnlModify(UnlModify) = "UNLModify",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerwire_codec::{DecodeError, DiscriminatedCodec, Family, UnknownPolicy, VariantRegistry};
    use ledgerwire_wire::json_to_value;
    use serde_json::json;

    #[test]
    fn unl_modify_uses_its_wire_discriminator() {
        let registry = VariantRegistry::<PseudoTransaction>::with_known().unwrap();
        let codec = DiscriminatedCodec::new(&registry, UnknownPolicy::Strict);
        let wire = json_to_value(json!({
            "transaction_type": "UNLModify",
            "ledger_sequence": 1024,
            "unl_modify_disabling": 1,
            "unl_modify_validator": "ED6629",
        }));

        let tx = codec.decode(&wire).unwrap();
        assert_eq!(tx.discriminator(), Some("UNLModify"));
        let PseudoTransaction::UnlModify(modify) = &tx else {
            panic!("expected UNLModify, got {:?}", tx);
        };
        assert_eq!(modify.unl_modify_disabling, 1);
        assert_eq!(modify.common.ledger_sequence, Some(1024));
        assert_eq!(codec.encode(&tx).unwrap(), wire);
    }

    #[test]
    fn disabling_flag_out_of_range() {
        let registry = VariantRegistry::<PseudoTransaction>::with_known().unwrap();
        let codec = DiscriminatedCodec::new(&registry, UnknownPolicy::Strict);
        let wire = json_to_value(json!({
            "transaction_type": "UNLModify",
            "unl_modify_disabling": 300,
            "unl_modify_validator": "ED6629",
        }));

        assert_eq!(
            codec.decode(&wire).unwrap_err(),
            DecodeError::InvalidFieldValue {
                family: "pseudo-transaction",
                shape: "UNLModify".to_string(),
                field: "unl_modify_disabling",
                detail: "300 is out of range".to_string(),
            }
        );
    }

    #[test]
    fn ordinary_transactions_are_unknown_here() {
        let registry = VariantRegistry::<PseudoTransaction>::with_known().unwrap();
        let codec = DiscriminatedCodec::new(&registry, UnknownPolicy::Strict);
        let wire = json_to_value(json!({
            "transaction_type": "Payment",
            "account": "rAlice",
        }));

        assert_eq!(
            codec.decode(&wire).unwrap_err(),
            DecodeError::UnknownDiscriminator {
                family: "pseudo-transaction",
                discriminator: "Payment".to_string(),
            }
        );
    }
}

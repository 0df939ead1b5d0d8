//! Signed transactions, tagged by `transaction_type`.

use ledgerwire_codec::{family, field, Field, Shape, TagConvention};

use crate::{Amount, Memo};

/// Fields every transaction carries. Only `account` is required.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionCommon {
    pub account: String,
    /// Fee in drops.
    pub fee: Option<String>,
    pub sequence: Option<u32>,
    pub flags: Option<u32>,
    pub last_ledger_sequence: Option<u32>,
    pub memos: Option<Vec<Memo>>,
    pub signing_pub_key: Option<String>,
    pub txn_signature: Option<String>,
    pub hash: Option<String>,
}

impl TransactionCommon {
    pub fn new(account: impl Into<String>) -> Self {
        TransactionCommon {
            account: account.into(),
            ..Default::default()
        }
    }
}

impl Shape for TransactionCommon {
    fn fields() -> Vec<Field<Self>> {
        vec![
            field!(required account),
            field!(optional fee),
            field!(optional sequence),
            field!(optional flags),
            field!(optional last_ledger_sequence),
            field!(optional memos),
            field!(optional signing_pub_key),
            field!(optional txn_signature),
            field!(optional hash),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Payment {
    pub common: TransactionCommon,
    pub destination: String,
    pub amount: Amount,
    pub send_max: Option<Amount>,
    pub destination_tag: Option<u32>,
    pub invoice_id: Option<String>,
}

impl Shape for Payment {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.extend([
            field!(required destination),
            field!(required amount),
            field!(optional send_max),
            field!(optional destination_tag),
            field!(optional invoice_id),
        ]);
        fields
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OfferCreate {
    pub common: TransactionCommon,
    pub taker_pays: Amount,
    pub taker_gets: Amount,
    pub expiration: Option<u32>,
    /// An offer to cancel in the same transaction.
    pub offer_sequence: Option<u32>,
}

impl Shape for OfferCreate {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.extend([
            field!(required taker_pays),
            field!(required taker_gets),
            field!(optional expiration),
            field!(optional offer_sequence),
        ]);
        fields
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OfferCancel {
    pub common: TransactionCommon,
    pub offer_sequence: u32,
}

impl Shape for OfferCancel {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.push(field!(required offer_sequence));
        fields
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EscrowCreate {
    pub common: TransactionCommon,
    pub destination: String,
    pub amount: Amount,
    pub finish_after: Option<u32>,
    pub cancel_after: Option<u32>,
    pub condition: Option<String>,
}

impl Shape for EscrowCreate {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.extend([
            field!(required destination),
            field!(required amount),
            field!(optional finish_after),
            field!(optional cancel_after),
            field!(optional condition),
        ]);
        fields
    }
}

/// Create or modify a trust line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrustSet {
    pub common: TransactionCommon,
    pub limit_amount: Amount,
    pub quality_in: Option<u32>,
    pub quality_out: Option<u32>,
}

impl Shape for TrustSet {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.extend([
            field!(required limit_amount),
            field!(optional quality_in),
            field!(optional quality_out),
        ]);
        fields
    }
}

family! {
    pub enum Transaction {
        name: "transaction",
        base: TransactionCommon,
        tag: TagConvention::Field("transaction_type"),
        variants: {
            Payment(Payment) = "Payment",
            OfferCreate(OfferCreate) = "OfferCreate",
            OfferCancel(OfferCancel) = "OfferCancel",
            EscrowCreate(EscrowCreate) = "EscrowCreate",
            TrustSet(TrustSet) = "TrustSet",
        }
    }
}

impl Transaction {
    pub fn common(&self) -> &TransactionCommon {
        match self {
            Transaction::Payment(tx) => &tx.common,
            Transaction::OfferCreate(tx) => &tx.common,
            Transaction::OfferCancel(tx) => &tx.common,
            Transaction::EscrowCreate(tx) => &tx.common,
            Transaction::TrustSet(tx) => &tx.common,
            Transaction::Unrecognized(tx) => &tx.base,
        }
    }

    pub fn account(&self) -> &str {
        &self.common().account
    }
}

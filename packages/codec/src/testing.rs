//! Small families used by this crate's unit tests.

use crate::{Field, Shape, TagConvention};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LedgerEntryBase {
    pub account: Option<String>,
    pub index: Option<String>,
}

impl Shape for LedgerEntryBase {
    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::optional("account", |s: &Self| &s.account, |s: &mut Self| &mut s.account),
            Field::optional("index", |s: &Self| &s.index, |s: &mut Self| &mut s.index),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Escrow {
    pub base: LedgerEntryBase,
    pub amount: String,
    pub destination: Option<String>,
}

impl Shape for Escrow {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.base, |s: &mut Self| &mut s.base);
        fields.push(Field::required(
            "amount",
            |s: &Self| &s.amount,
            |s: &mut Self| &mut s.amount,
        ));
        fields.push(Field::optional(
            "destination",
            |s: &Self| &s.destination,
            |s: &mut Self| &mut s.destination,
        ));
        fields
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Offer {
    pub base: LedgerEntryBase,
    pub taker_pays: String,
    pub taker_gets: String,
}

impl Shape for Offer {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.base, |s: &mut Self| &mut s.base);
        fields.push(Field::required(
            "taker_pays",
            |s: &Self| &s.taker_pays,
            |s: &mut Self| &mut s.taker_pays,
        ));
        fields.push(Field::required(
            "taker_gets",
            |s: &Self| &s.taker_gets,
            |s: &mut Self| &mut s.taker_gets,
        ));
        fields
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Check {
    pub base: LedgerEntryBase,
}

impl Shape for Check {
    fn fields() -> Vec<Field<Self>> {
        Field::embedded(|s: &Self| &s.base, |s: &mut Self| &mut s.base)
    }
}

crate::family! {
    pub enum LedgerEntry {
        name: "ledger entry",
        base: LedgerEntryBase,
        tag: TagConvention::Field("ledger_entry_type"),
        variants: {
            Escrow(Escrow) = "Escrow",
            Offer(Offer) = "Offer",
            Check(Check) = "Check",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectorBase {
    pub binary: Option<bool>,
}

impl Shape for SelectorBase {
    fn fields() -> Vec<Field<Self>> {
        vec![Field::optional(
            "binary",
            |s: &Self| &s.binary,
            |s: &mut Self| &mut s.binary,
        )]
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexSelector {
    pub index: String,
    pub binary: Option<bool>,
}

impl Shape for IndexSelector {
    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::required("index", |s: &Self| &s.index, |s: &mut Self| &mut s.index),
            Field::optional("binary", |s: &Self| &s.binary, |s: &mut Self| &mut s.binary),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountSelector {
    pub account_root: String,
    pub binary: Option<bool>,
}

impl Shape for AccountSelector {
    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::required(
                "account_root",
                |s: &Self| &s.account_root,
                |s: &mut Self| &mut s.account_root,
            ),
            Field::optional("binary", |s: &Self| &s.binary, |s: &mut Self| &mut s.binary),
        ]
    }
}

crate::family! {
    pub enum Selector {
        name: "selector",
        base: SelectorBase,
        tag: TagConvention::Inferred(&[("index", "Index"), ("account_root", "AccountRoot")]),
        variants: {
            Index(IndexSelector) = "Index",
            AccountRoot(AccountSelector) = "AccountRoot",
        }
    }
}

//! Ledger object selectors, the parameters of a `ledger_entry` request.
//!
//! A selector has no tag: which object is wanted follows from which selecting
//! property is present. When several are present the first rule wins, in the
//! order `index`, `account_root`, `check`, `offer`, `escrow`.

use ledgerwire_codec::{family, field, Field, Shape, TagConvention};

use crate::{EscrowLocator, LedgerIndex, OfferLocator};

/// Which ledger to look in, and how to return the object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectorCommon {
    pub ledger_index: Option<LedgerIndex>,
    pub ledger_hash: Option<String>,
    pub binary: Option<bool>,
}

impl Shape for SelectorCommon {
    fn fields() -> Vec<Field<Self>> {
        vec![
            field!(optional ledger_index),
            field!(optional ledger_hash),
            field!(optional binary),
        ]
    }
}

/// Select any object by its ID.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexSelector {
    pub common: SelectorCommon,
    pub index: String,
}

impl Shape for IndexSelector {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.push(field!(required index));
        fields
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountRootSelector {
    pub common: SelectorCommon,
    /// Address of the account.
    pub account_root: String,
}

impl Shape for AccountRootSelector {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.push(field!(required account_root));
        fields
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckSelector {
    pub common: SelectorCommon,
    /// Object ID of the check.
    pub check: String,
}

impl Shape for CheckSelector {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.push(field!(required check));
        fields
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OfferSelector {
    pub common: SelectorCommon,
    pub offer: OfferLocator,
}

impl Shape for OfferSelector {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.push(field!(required offer));
        fields
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EscrowSelector {
    pub common: SelectorCommon,
    pub escrow: EscrowLocator,
}

impl Shape for EscrowSelector {
    fn fields() -> Vec<Field<Self>> {
        let mut fields = Field::embedded(|s: &Self| &s.common, |s: &mut Self| &mut s.common);
        fields.push(field!(required escrow));
        fields
    }
}

family! {
    pub enum LedgerObjectSelector {
        name: "ledger object selector",
        base: SelectorCommon,
        tag: TagConvention::Inferred(&[
            ("index", "Index"),
            ("account_root", "AccountRoot"),
            ("check", "Check"),
            ("offer", "Offer"),
            ("escrow", "Escrow"),
        ]),
        variants: {
            Index(IndexSelector) = "Index",
            AccountRoot(AccountRootSelector) = "AccountRoot",
            Check(CheckSelector) = "Check",
            Offer(OfferSelector) = "Offer",
            Escrow(EscrowSelector) = "Escrow",
        }
    }
}

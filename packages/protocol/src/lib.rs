//! Ledger protocol message families for ledgerwire.
//!
//! Four families are defined on top of `ledgerwire-codec`:
//!
//! | family                   | discriminator                      |
//! |--------------------------|------------------------------------|
//! | `LedgerEntry`            | `ledger_entry_type` property        |
//! | `Transaction`            | `transaction_type` property         |
//! | `PseudoTransaction`      | `transaction_type` property         |
//! | `LedgerObjectSelector`   | which selecting property is present |
//!
//! `protocol_registry` installs all of them; `RpcRequest` carries typed
//! request parameters.

mod amount;
mod error;
mod ledger_entry;
mod pseudo_transaction;
mod registry;
mod request;
mod selector;
mod transaction;

pub use amount::{
    Amount, EscrowLocator, LedgerIndex, LedgerShortcut, Memo, OfferLocator, TokenAmount,
};
pub use error::{Error, Result};
pub use ledger_entry::{AccountRoot, Check, Escrow, LedgerEntry, LedgerEntryCommon, Offer};
pub use pseudo_transaction::{
    EnableAmendment, PseudoTransaction, PseudoTransactionCommon, SetFee, UnlModify,
};
pub use registry::{protocol_registry, Message, FAMILY_NAMES};
pub use request::{
    AccountInfoParams, AccountLinesParams, LedgerParams, MethodParams, RpcRequest, SubmitParams,
};
pub use selector::{
    AccountRootSelector, CheckSelector, EscrowSelector, IndexSelector, LedgerObjectSelector,
    OfferSelector, SelectorCommon,
};
pub use transaction::{
    EscrowCreate, OfferCancel, OfferCreate, Payment, Transaction, TransactionCommon, TrustSet,
};

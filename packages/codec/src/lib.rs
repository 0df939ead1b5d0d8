//! Discriminated codecs for open message families
//!
//! A *family* (ledger entries, transactions, pseudo-transactions, ...) is a set
//! of concrete record shapes that share a base contract. On the wire, the
//! concrete shape is identified by a discriminator: a tag property, or the
//! presence of a family-specific property. This crate provides:
//!
//! - `Field` / `Shape`: per-type descriptions of how fields move to and from
//!   the wire tree
//! - `VariantRegistry`: discriminator -> shape descriptor, sealed after startup
//! - `DiscriminatedCodec`: decode/encode with an `UnknownPolicy` for tags the
//!   registry does not know
//! - `ParamEnvelope`: homogeneous parameter storage with a typed view
//! - `CodecRegistry`: the read-only facade over every family
//!
//! # Example
//!
//! ```rust,ignore
//! use ledgerwire_codec::{CodecRegistry, UnknownPolicy};
//!
//! let mut builder = CodecRegistry::builder();
//! builder.known::<LedgerEntry>()?;
//! let registry = builder.build();
//!
//! let entry: LedgerEntry = registry.decode(&wire)?;
//! let wire_again = registry.encode(&entry)?;
//! ```

pub use ledgerwire_wire::{Error as WireError, Map, Value, ValueKind};

mod codec;
mod config;
mod envelope;
mod error;
mod facade;
mod family;
mod field;
mod registry;
mod shape;

pub use codec::DiscriminatedCodec;
pub use config::CodecConfig;
pub use envelope::{EnvelopeMode, ParamEnvelope, Params};
pub use error::{
    ConfigError, DecodeError, EncodeError, EnvelopeError, Error, RegistryError, Result,
};
pub use facade::{CodecRegistry, CodecRegistryBuilder, FamilyCatalog};
pub use family::{Family, TagConvention, UnknownPolicy, Unrecognized};
pub use field::{Field, FieldInfo, FieldKind, WireField};
pub use registry::{Registration, VariantRegistry};
pub use shape::{Member, Shape, ShapeDescriptor};

#[doc(hidden)]
pub mod __private {
    pub use ledgerwire_wire::{from_value, to_value, Error as WireError};
}

#[cfg(test)]
mod testing;

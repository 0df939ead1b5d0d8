//! Error types for the codec layer.

use std::path::PathBuf;

use thiserror::Error;

use crate::{FieldKind, ValueKind};

/// Misuse while assembling registries. Always fatal to startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The family already maps this discriminator to a shape.
    #[error("duplicate discriminator {discriminator:?} in family {family}")]
    DuplicateDiscriminator {
        family: &'static str,
        discriminator: String,
    },

    /// The Rust type is already registered under another discriminator.
    #[error("type {type_name} is already registered in family {family} as {existing:?}")]
    DuplicateType {
        family: &'static str,
        type_name: &'static str,
        existing: String,
    },

    /// The registry was sealed before this registration.
    #[error("registry for family {family} is sealed")]
    Frozen { family: &'static str },

    /// A second registry was installed for the same family.
    #[error("family {family} is already installed")]
    DuplicateFamily { family: &'static str },
}

/// Failures caused by the wire value being decoded.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    /// The wire value is not an object.
    #[error("malformed {family} wire value: expected object, found {found}")]
    Malformed {
        family: &'static str,
        found: ValueKind,
    },

    /// A required field is absent or null.
    #[error("{family} {shape} is missing required field {field:?}")]
    MissingRequiredField {
        family: &'static str,
        shape: String,
        field: &'static str,
    },

    /// A field is present but holds the wrong kind of value.
    #[error("{family} {shape} field {field:?}: expected {expected}, found {found}")]
    FieldTypeMismatch {
        family: &'static str,
        shape: String,
        field: &'static str,
        expected: FieldKind,
        found: ValueKind,
    },

    /// A field has an accepted kind but its value does not convert, such as
    /// an integer out of range or an array with a bad element.
    #[error("{family} {shape} field {field:?}: {detail}")]
    InvalidFieldValue {
        family: &'static str,
        shape: String,
        field: &'static str,
        detail: String,
    },

    /// Strict policy: the discriminator is not registered.
    #[error("unknown {family} discriminator {discriminator:?}")]
    UnknownDiscriminator {
        family: &'static str,
        discriminator: String,
    },

    /// Strict policy: no discriminator could be extracted at all.
    #[error("{family} wire value carries no discriminator")]
    MissingDiscriminator { family: &'static str },
}

/// Failures while encoding a typed value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The concrete shape was never registered with the family.
    #[error("{shape} is not registered in family {family}")]
    UnregisteredType { family: &'static str, shape: String },

    /// A field value has no wire form.
    #[error("{family} {shape} field {field:?} could not be encoded: {message}")]
    FieldConversion {
        family: &'static str,
        shape: String,
        field: &'static str,
        message: String,
    },
}

/// Failures of the parameter envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Strict mode: a stored parameter is not of the requested type.
    #[error("parameter {index} is {found}, expected {expected}")]
    ParameterTypeMismatch {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// A parameter could not be moved to or from the wire tree.
    #[error("parameter conversion failed: {0}")]
    Wire(#[from] ledgerwire_wire::Error),

    /// The wire value holding parameters is not an array.
    #[error("expected a parameter array, found {found}")]
    NotAnArray { found: ValueKind },
}

/// Failures loading a `CodecConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Any error raised by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The facade has no registry for the family.
    #[error("family {family} is not installed")]
    UnknownFamily { family: &'static str },
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

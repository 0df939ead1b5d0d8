use thiserror::Error;

use ledgerwire_codec::EnvelopeError;

/// Errors raised by the protocol layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Codec(#[from] ledgerwire_codec::Error),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// The request object lacks a method or has the wrong shape.
    #[error("malformed request: {message}")]
    MalformedRequest { message: String },

    /// The request names another method than the parameters were read as.
    #[error("request method {found:?} does not take {expected} parameters")]
    MethodMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("no family named {name:?}")]
    UnknownFamily { name: String },
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedRequest {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

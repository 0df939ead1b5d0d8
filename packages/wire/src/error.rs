//! Error types for the wire layer.

/// Errors raised while moving between bytes, `Value` trees and serde types.
#[derive(Debug)]
pub enum Error {
    /// Bytes or a `Value` could not be decoded into the requested shape.
    Decode { message: String },

    /// A value could not be encoded.
    Encode { message: String },
}

impl Error {
    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Error::Encode {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Decode { message } => write!(f, "decode error: {}", message),
            Error::Encode { message } => write!(f, "encode error: {}", message),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn decode_error_display() {
        let e = Error::decode("unexpected token");
        let display = format!("{}", e);
        assert!(display.contains("decode error"));
        assert!(display.contains("unexpected token"));
    }

    #[test]
    fn encode_error_display() {
        let e = Error::encode("serialization failed");
        let display = format!("{}", e);
        assert!(display.contains("encode error"));
        assert!(display.contains("serialization failed"));
    }

    #[test]
    fn error_has_no_source() {
        assert!(StdError::source(&Error::decode("x")).is_none());
    }
}

//! String converter error types

use std::fmt;
use thiserror::Error;

/// Malformed input handed to a string converter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Conversion '{converter}' failed ({kind}): {message}")]
pub struct ConversionError {
    /// Name of the converter that rejected the input
    pub converter: String,
    /// Why the input was rejected
    pub kind: ConversionErrorKind,
    /// Human readable detail
    pub message: String,
}

/// Sub-reason of a conversion failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionErrorKind {
    /// Input could not be parsed as a number, base64 text or date
    Parse,
    /// Decoded bytes are not valid UTF-8
    Encoding,
    /// Value does not fit the target representation
    Overflow,
}

impl fmt::Display for ConversionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionErrorKind::Parse => write!(f, "parse"),
            ConversionErrorKind::Encoding => write!(f, "encoding"),
            ConversionErrorKind::Overflow => write!(f, "overflow"),
        }
    }
}

impl ConversionError {
    fn new(converter: &str, kind: ConversionErrorKind, message: impl Into<String>) -> Self {
        Self {
            converter: converter.to_string(),
            kind,
            message: message.into(),
        }
    }

    /// Create a parse failure
    pub fn parse(converter: &str, message: impl Into<String>) -> Self {
        Self::new(converter, ConversionErrorKind::Parse, message)
    }

    /// Create an encoding failure
    pub fn encoding(converter: &str, message: impl Into<String>) -> Self {
        Self::new(converter, ConversionErrorKind::Encoding, message)
    }

    /// Create an overflow failure
    pub fn overflow(converter: &str, message: impl Into<String>) -> Self {
        Self::new(converter, ConversionErrorKind::Overflow, message)
    }
}

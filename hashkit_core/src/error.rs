//! Error types for the hashkit core library
//!
//! Errors are organized into logical categories. Every error is terminal for
//! the request that produced it: nothing is retried and no partial result is
//! returned alongside a failure.

use thiserror::Error;

pub mod conversion;
pub mod internal;
pub mod io;
pub mod validation;

pub use self::conversion::{ConversionError, ConversionErrorKind};
pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;
pub use internal::InternalError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the hashkit core library
///
/// Errors are categorized into five main types:
/// - I/O errors: opening, inspecting and reading files
/// - Validation errors: unknown algorithms, bad options, busy guards
/// - Conversion errors: malformed input to a string converter
/// - Cancellation: the caller abandoned the operation
/// - Internal errors: worker task failures
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Converter input errors
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The operation was cancelled through its cancellation token
    #[error("Operation cancelled")]
    Cancelled,

    /// Internal library errors
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl Error {
    /// Shorthand for an unknown algorithm or converter name
    pub fn unsupported_algorithm(name: &str) -> Self {
        Self::Validation(ValidationError::unsupported_algorithm(name))
    }

    /// Whether this error was caused by cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

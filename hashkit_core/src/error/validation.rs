//! Validation related error types

use thiserror::Error;

/// Request validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Algorithm or converter name with no registered implementation
    #[error("Unsupported algorithm: {name}")]
    UnsupportedAlgorithm { name: String },

    /// Chunk size must be at least one byte
    #[error("Invalid chunk size {size}: must be greater than zero")]
    InvalidChunkSize { size: usize },

    /// An exclusive file hash is already running
    #[error("Another file hash operation is already in progress")]
    OperationInProgress,
}

impl ValidationError {
    /// Create an unsupported algorithm error
    pub fn unsupported_algorithm(name: &str) -> Self {
        Self::UnsupportedAlgorithm {
            name: name.to_string(),
        }
    }

    /// Create an invalid chunk size error
    pub fn invalid_chunk_size(size: usize) -> Self {
        Self::InvalidChunkSize { size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_algorithm_error() {
        let error = ValidationError::unsupported_algorithm("md4");
        assert!(error.to_string().contains("Unsupported algorithm"));
        assert!(error.to_string().contains("md4"));
    }

    #[test]
    fn test_invalid_chunk_size_error() {
        let error = ValidationError::invalid_chunk_size(0);
        assert!(error.to_string().contains("chunk size 0"));
    }

    #[test]
    fn test_operation_in_progress_error() {
        let error = ValidationError::OperationInProgress;
        assert!(error.to_string().contains("already in progress"));
    }
}

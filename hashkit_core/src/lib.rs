//! Hashkit Core Library
//!
//! Streaming file hashing, in-memory digests and string conversions.
//! Files are read through a fixed size chunk buffer so memory use does not
//! grow with file size, with progress reporting and cooperative cancellation
//! between chunks.

pub mod api;
pub mod cancel;
pub mod convert;
pub mod error;
pub mod hashing;
pub mod progress;

// Re-export main types
pub use api::{FileHashJob, HashService};
pub use cancel::CancellationToken;
pub use convert::Converter;
pub use error::{Error, Result};
pub use hashing::{
    AlgorithmRegistry, DEFAULT_CHUNK_SIZE, FileHasher, HashAlgorithm, HashCalculator,
    HashDigest, HashOptions, HashResult, LetterCase, digest_matches,
};
pub use progress::{ChannelProvider, NullProvider, ProgressProvider, ProgressUpdate};

/// Core library configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HashkitConfig {
    /// Bytes read per chunk when hashing files
    pub chunk_size: usize,
    /// Letter case used when rendering digests
    pub letter_case: LetterCase,
    /// Progress updates buffered for background jobs before new ones are dropped
    pub progress_capacity: usize,
}

impl Default for HashkitConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            letter_case: LetterCase::Lower,
            progress_capacity: 100,
        }
    }
}

impl HashkitConfig {
    /// Create a test configuration
    pub fn test() -> Self {
        Self {
            // Several chunks for small fixtures
            chunk_size: 1024,
            letter_case: LetterCase::Lower,
            // Keep every update in tests
            progress_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HashkitConfig::default();
        assert_eq!(config.chunk_size, 4096);
        assert_eq!(config.letter_case, LetterCase::Lower);
        assert_eq!(config.progress_capacity, 100);
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: HashkitConfig =
            serde_json::from_str(r#"{ "letter_case": "upper" }"#).unwrap();
        assert_eq!(config.letter_case, LetterCase::Upper);
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
    }
}

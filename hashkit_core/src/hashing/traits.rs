//! Core traits for the hash algorithm extensibility system

use super::{HashAlgorithm, HashDigest};
use crate::Result;
use std::sync::Arc;

/// Core trait that all digest algorithms must implement
pub trait HashAlgorithmImpl: Send + Sync {
    /// Identifier this implementation is registered under
    fn algorithm(&self) -> HashAlgorithm;

    /// Display name for user interfaces
    fn display_name(&self) -> &'static str;

    /// Size of the finalized digest in bytes
    fn digest_len(&self) -> usize;

    /// Create a fresh streaming hasher
    fn create_hasher(&self) -> Box<dyn StreamingHasher>;

    /// Calculate the digest of in-memory data
    fn hash_bytes(&self, data: &[u8]) -> HashDigest {
        // Use the streaming hasher for consistency
        let mut hasher = self.create_hasher();
        hasher.update(data);
        hasher.finalize()
    }
}

/// Incremental digest state owned by a single hash operation
///
/// Updates are order sensitive. `finalize` consumes the state so it cannot be
/// fed again afterwards.
pub trait StreamingHasher: Send {
    /// Feed the next chunk; an empty chunk leaves the state unchanged
    fn update(&mut self, data: &[u8]);

    /// Apply padding or final XOR and return the digest
    fn finalize(self: Box<Self>) -> HashDigest;
}

/// Resolve a [`HashAlgorithm`] to its registered implementation
pub trait HashAlgorithmExt {
    /// Look the algorithm up in the global registry
    fn to_impl(&self) -> Result<Arc<dyn HashAlgorithmImpl>>;
}

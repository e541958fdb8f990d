//! Central registry for hash algorithm implementations

use super::traits::{HashAlgorithmExt, HashAlgorithmImpl, StreamingHasher};
use super::HashAlgorithm;
use crate::{Error, Result};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Description of a registered algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub algorithm: HashAlgorithm,
    pub display_name: &'static str,
    pub digest_len: usize,
}

/// Maps each [`HashAlgorithm`] to its implementation
pub struct AlgorithmRegistry {
    algorithms: HashMap<HashAlgorithm, Arc<dyn HashAlgorithmImpl>>,
}

impl std::fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("algorithms", &self.algorithms.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AlgorithmRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            algorithms: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in algorithm
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        super::algorithms::register_all(&mut registry);
        registry
    }

    /// Get the global registry instance
    pub fn global() -> &'static Self {
        static INSTANCE: OnceCell<AlgorithmRegistry> = OnceCell::new();
        INSTANCE.get_or_init(Self::with_builtin)
    }

    /// Register an algorithm, replacing any previous implementation for its id
    pub fn register(&mut self, algorithm: impl HashAlgorithmImpl + 'static) {
        self.algorithms
            .insert(algorithm.algorithm(), Arc::new(algorithm));
    }

    /// Get algorithm implementation by id
    pub fn get(&self, algorithm: HashAlgorithm) -> Option<Arc<dyn HashAlgorithmImpl>> {
        self.algorithms.get(&algorithm).cloned()
    }

    /// Get algorithm implementation, failing for unregistered ids
    pub fn resolve(&self, algorithm: HashAlgorithm) -> Result<Arc<dyn HashAlgorithmImpl>> {
        self.get(algorithm)
            .ok_or_else(|| Error::unsupported_algorithm(&algorithm.to_string()))
    }

    /// Create a fresh digest state for the algorithm
    pub fn create_hasher(&self, algorithm: HashAlgorithm) -> Result<Box<dyn StreamingHasher>> {
        Ok(self.resolve(algorithm)?.create_hasher())
    }

    /// List all registered algorithms in presentation order
    pub fn list(&self) -> Vec<AlgorithmInfo> {
        let mut infos: Vec<_> = self
            .algorithms
            .values()
            .map(|algo| AlgorithmInfo {
                algorithm: algo.algorithm(),
                display_name: algo.display_name(),
                digest_len: algo.digest_len(),
            })
            .collect();
        infos.sort_by_key(|info| info.algorithm);
        infos
    }
}

impl HashAlgorithmExt for HashAlgorithm {
    fn to_impl(&self) -> Result<Arc<dyn HashAlgorithmImpl>> {
        AlgorithmRegistry::global().resolve(*self)
    }
}

//! SHA-2 family implementations
//!
//! SHA-224/256 share one compression function and SHA-384/512 another; all
//! four are served by one generic streaming hasher.

use crate::hashing::traits::{HashAlgorithmImpl, StreamingHasher};
use crate::hashing::{HashAlgorithm, HashDigest};
use sha2::{Digest as Sha2Digest, Sha224, Sha256, Sha384, Sha512};

/// One member of the SHA-2 family
#[derive(Debug, Clone, Copy)]
pub enum Sha2Algorithm {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

struct Sha2StreamingHasher<D> {
    hasher: D,
}

impl<D: Sha2Digest> Sha2StreamingHasher<D> {
    fn new() -> Self {
        Self { hasher: D::new() }
    }
}

impl<D: Sha2Digest + Send> StreamingHasher for Sha2StreamingHasher<D> {
    fn update(&mut self, data: &[u8]) {
        Sha2Digest::update(&mut self.hasher, data);
    }

    fn finalize(self: Box<Self>) -> HashDigest {
        HashDigest::Bytes(Sha2Digest::finalize(self.hasher).to_vec())
    }
}

impl HashAlgorithmImpl for Sha2Algorithm {
    fn algorithm(&self) -> HashAlgorithm {
        match self {
            Sha2Algorithm::Sha224 => HashAlgorithm::SHA224,
            Sha2Algorithm::Sha256 => HashAlgorithm::SHA256,
            Sha2Algorithm::Sha384 => HashAlgorithm::SHA384,
            Sha2Algorithm::Sha512 => HashAlgorithm::SHA512,
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            Sha2Algorithm::Sha224 => "SHA-224",
            Sha2Algorithm::Sha256 => "SHA-256",
            Sha2Algorithm::Sha384 => "SHA-384",
            Sha2Algorithm::Sha512 => "SHA-512",
        }
    }

    fn digest_len(&self) -> usize {
        match self {
            Sha2Algorithm::Sha224 => 28,
            Sha2Algorithm::Sha256 => 32,
            Sha2Algorithm::Sha384 => 48,
            Sha2Algorithm::Sha512 => 64,
        }
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        match self {
            Sha2Algorithm::Sha224 => Box::new(Sha2StreamingHasher::<Sha224>::new()),
            Sha2Algorithm::Sha256 => Box::new(Sha2StreamingHasher::<Sha256>::new()),
            Sha2Algorithm::Sha384 => Box::new(Sha2StreamingHasher::<Sha384>::new()),
            Sha2Algorithm::Sha512 => Box::new(Sha2StreamingHasher::<Sha512>::new()),
        }
    }
}

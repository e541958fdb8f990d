//! CRC32 checksum implementation

use crate::hashing::traits::{HashAlgorithmImpl, StreamingHasher};
use crate::hashing::{HashAlgorithm, HashDigest};
use crc32fast::Hasher as Crc32Hasher;

pub struct Crc32Algorithm;

/// CRC32 streaming hasher
struct Crc32StreamingHasher {
    hasher: Crc32Hasher,
}

impl Crc32StreamingHasher {
    fn new() -> Self {
        Self {
            hasher: Crc32Hasher::new(),
        }
    }
}

impl StreamingHasher for Crc32StreamingHasher {
    fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    fn finalize(self: Box<Self>) -> HashDigest {
        HashDigest::Checksum {
            value: self.hasher.finalize(),
            width: 4,
        }
    }
}

impl HashAlgorithmImpl for Crc32Algorithm {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::CRC32
    }

    fn display_name(&self) -> &'static str {
        "CRC-32"
    }

    fn digest_len(&self) -> usize {
        4
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(Crc32StreamingHasher::new())
    }
}

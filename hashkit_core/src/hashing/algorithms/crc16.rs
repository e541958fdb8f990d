//! CRC16 checksum implementation (CRC-16/ARC)

use crate::hashing::traits::{HashAlgorithmImpl, StreamingHasher};
use crate::hashing::{HashAlgorithm, HashDigest};
use crc::{CRC_16_ARC, Crc, Digest};

// Reflected polynomial 0x8005, zero init, no final XOR
static CRC16_ARC: Crc<u16> = Crc::<u16>::new(&CRC_16_ARC);

pub struct Crc16Algorithm;

/// CRC16 streaming hasher
struct Crc16StreamingHasher {
    digest: Digest<'static, u16>,
}

impl Crc16StreamingHasher {
    fn new() -> Self {
        Self {
            digest: CRC16_ARC.digest(),
        }
    }
}

impl StreamingHasher for Crc16StreamingHasher {
    fn update(&mut self, data: &[u8]) {
        self.digest.update(data);
    }

    fn finalize(self: Box<Self>) -> HashDigest {
        HashDigest::Checksum {
            value: u32::from(self.digest.finalize()),
            width: 2,
        }
    }
}

impl HashAlgorithmImpl for Crc16Algorithm {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::CRC16
    }

    fn display_name(&self) -> &'static str {
        "CRC-16"
    }

    fn digest_len(&self) -> usize {
        2
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(Crc16StreamingHasher::new())
    }
}

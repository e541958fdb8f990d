//! Hash calculation functionality for the hashkit core library
//!
//! Digest algorithms are looked up through the [`AlgorithmRegistry`] and
//! driven through the [`StreamingHasher`] trait, so in-memory and streaming
//! calculations share one code path.

use crate::{Error, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

mod algorithms;
mod registry;
mod streaming;
mod traits;

pub use registry::{AlgorithmInfo, AlgorithmRegistry};
pub use streaming::{DEFAULT_CHUNK_SIZE, FileHasher, HashOptions};
pub use traits::{HashAlgorithmExt, HashAlgorithmImpl, StreamingHasher};

/// Digest algorithms supported by the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// MD5 (16 byte digest)
    MD5,
    /// SHA-1 (20 byte digest)
    SHA1,
    /// SHA-224 (28 byte digest)
    SHA224,
    /// SHA-256 (32 byte digest)
    SHA256,
    /// SHA-384 (48 byte digest)
    SHA384,
    /// SHA-512 (64 byte digest)
    SHA512,
    /// CRC-16/ARC checksum
    CRC16,
    /// CRC-32 (IEEE) checksum
    CRC32,
}

impl HashAlgorithm {
    /// Every supported algorithm, in presentation order
    pub const ALL: [HashAlgorithm; 8] = [
        HashAlgorithm::MD5,
        HashAlgorithm::SHA1,
        HashAlgorithm::SHA224,
        HashAlgorithm::SHA256,
        HashAlgorithm::SHA384,
        HashAlgorithm::SHA512,
        HashAlgorithm::CRC16,
        HashAlgorithm::CRC32,
    ];

    /// Whether the algorithm yields an integer checksum rather than a byte digest
    pub fn is_checksum(&self) -> bool {
        matches!(self, HashAlgorithm::CRC16 | HashAlgorithm::CRC32)
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithm::MD5 => write!(f, "md5"),
            HashAlgorithm::SHA1 => write!(f, "sha1"),
            HashAlgorithm::SHA224 => write!(f, "sha224"),
            HashAlgorithm::SHA256 => write!(f, "sha256"),
            HashAlgorithm::SHA384 => write!(f, "sha384"),
            HashAlgorithm::SHA512 => write!(f, "sha512"),
            HashAlgorithm::CRC16 => write!(f, "crc16"),
            HashAlgorithm::CRC32 => write!(f, "crc32"),
        }
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Accept "SHA-256" and "sha_256" alongside "sha256"
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "md5" => Ok(HashAlgorithm::MD5),
            "sha1" => Ok(HashAlgorithm::SHA1),
            "sha224" => Ok(HashAlgorithm::SHA224),
            "sha256" => Ok(HashAlgorithm::SHA256),
            "sha384" => Ok(HashAlgorithm::SHA384),
            "sha512" => Ok(HashAlgorithm::SHA512),
            "crc16" => Ok(HashAlgorithm::CRC16),
            "crc32" => Ok(HashAlgorithm::CRC32),
            _ => Err(Error::unsupported_algorithm(s)),
        }
    }
}

/// Letter case used when rendering a digest as hexadecimal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterCase {
    #[default]
    Lower,
    Upper,
}

/// Finalized output of a digest algorithm
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashDigest {
    /// Fixed-size byte digest of a cryptographic hash
    Bytes(Vec<u8>),
    /// Integer register of a CRC; `width` is the checksum size in bytes
    Checksum { value: u32, width: u8 },
}

impl HashDigest {
    /// Size of the digest in bytes
    pub fn byte_len(&self) -> usize {
        match self {
            HashDigest::Bytes(bytes) => bytes.len(),
            HashDigest::Checksum { width, .. } => usize::from(*width),
        }
    }

    /// Digest as big-endian bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            HashDigest::Bytes(bytes) => bytes.clone(),
            HashDigest::Checksum { value, width } => {
                let bytes = value.to_be_bytes();
                bytes[bytes.len() - usize::from(*width)..].to_vec()
            }
        }
    }

    /// Integer value for checksum digests
    pub fn as_checksum(&self) -> Option<u32> {
        match self {
            HashDigest::Checksum { value, .. } => Some(*value),
            HashDigest::Bytes(_) => None,
        }
    }

    /// Render as hexadecimal
    ///
    /// Byte digests use two digits per byte. Checksums are rendered as an
    /// unpadded integer, so the CRC32 of empty input is `0`.
    pub fn to_hex(&self, case: LetterCase) -> String {
        match (self, case) {
            (HashDigest::Checksum { value, .. }, LetterCase::Lower) => format!("{value:x}"),
            (HashDigest::Checksum { value, .. }, LetterCase::Upper) => format!("{value:X}"),
            (HashDigest::Bytes(bytes), case) => {
                let mut out = String::with_capacity(bytes.len() * 2);
                for byte in bytes {
                    let _ = match case {
                        LetterCase::Lower => write!(out, "{byte:02x}"),
                        LetterCase::Upper => write!(out, "{byte:02X}"),
                    };
                }
                out
            }
        }
    }
}

impl std::fmt::Display for HashDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex(LetterCase::Lower))
    }
}

fn serialize_digest<S: Serializer>(
    digest: &HashDigest,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&digest.to_hex(LetterCase::Lower))
}

/// Result of hash calculation
#[derive(Debug, Clone, Serialize)]
pub struct HashResult {
    pub algorithm: HashAlgorithm,
    #[serde(rename = "hash", serialize_with = "serialize_digest")]
    pub digest: HashDigest,
    pub input_size: u64,
    pub duration: Duration,
}

impl HashResult {
    /// Render the digest in the requested letter case
    pub fn hex(&self, case: LetterCase) -> String {
        self.digest.to_hex(case)
    }
}

/// Compare a computed digest with a user-supplied expected value
///
/// Comparison ignores letter case and surrounding whitespace.
pub fn digest_matches(actual: &str, expected: &str) -> bool {
    actual.trim().eq_ignore_ascii_case(expected.trim())
}

/// Hash calculator for in-memory data and files
#[derive(Debug, Clone, Default)]
pub struct HashCalculator {
    file_hasher: FileHasher,
}

impl HashCalculator {
    /// Create a new hash calculator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hash calculator whose file hashing uses the given options
    pub fn with_options(options: HashOptions) -> Self {
        Self {
            file_hasher: FileHasher::with_options(options),
        }
    }

    /// Calculate hash for byte data
    pub fn calculate_bytes(&self, algorithm: HashAlgorithm, data: &[u8]) -> Result<HashResult> {
        let start_time = Instant::now();
        let algo_impl: Arc<dyn HashAlgorithmImpl> = algorithm.to_impl()?;
        let digest = algo_impl.hash_bytes(data);

        Ok(HashResult {
            algorithm,
            digest,
            input_size: data.len() as u64,
            duration: start_time.elapsed(),
        })
    }

    /// Calculate hash for the UTF-8 bytes of a string
    pub fn calculate_str(&self, algorithm: HashAlgorithm, input: &str) -> Result<HashResult> {
        self.calculate_bytes(algorithm, input.as_bytes())
    }

    /// Calculate hash for a file using streaming to avoid loading it into memory
    pub async fn calculate_file(
        &self,
        file_path: &Path,
        algorithm: HashAlgorithm,
    ) -> Result<HashResult> {
        self.file_hasher.hash_file(file_path, algorithm).await
    }

    /// Check if an algorithm is supported
    pub fn supports_algorithm(&self, algorithm: HashAlgorithm) -> bool {
        AlgorithmRegistry::global().get(algorithm).is_some()
    }
}

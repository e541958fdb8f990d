//! Hash algorithm implementations

use super::registry::AlgorithmRegistry;

mod crc16;
mod crc32;
mod md5;
mod sha1;
mod sha2;

/// Register all built-in algorithms with the registry
pub(crate) fn register_all(registry: &mut AlgorithmRegistry) {
    registry.register(md5::Md5Algorithm);
    registry.register(sha1::Sha1Algorithm);
    registry.register(sha2::Sha2Algorithm::Sha224);
    registry.register(sha2::Sha2Algorithm::Sha256);
    registry.register(sha2::Sha2Algorithm::Sha384);
    registry.register(sha2::Sha2Algorithm::Sha512);
    registry.register(crc16::Crc16Algorithm);
    registry.register(crc32::Crc32Algorithm);
}

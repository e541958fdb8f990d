//! Streaming file hasher
//!
//! Reads a file through one reusable chunk buffer and feeds every chunk to the
//! selected algorithm, so peak memory is bounded by the chunk size whatever
//! the file size.

use super::traits::HashAlgorithmExt;
use super::{HashAlgorithm, HashDigest, HashResult};
use crate::cancel::CancellationToken;
use crate::progress::{NullProvider, ProgressProvider, ProgressUpdate};
use crate::{
    Error, Result,
    error::{IoError, ValidationError},
};
use std::path::Path;
use std::time::Instant;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Default read size in bytes
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Options for a streaming hash operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashOptions {
    /// Maximum number of bytes read per chunk
    pub chunk_size: usize,
}

impl Default for HashOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl HashOptions {
    /// Options with a custom chunk size
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::Validation(ValidationError::invalid_chunk_size(
                self.chunk_size,
            )));
        }
        Ok(())
    }
}

/// Computes digests of files without buffering them in memory
///
/// The hasher holds no per-operation state, so one instance can serve any
/// number of concurrent operations.
#[derive(Debug, Clone, Default)]
pub struct FileHasher {
    options: HashOptions,
}

impl FileHasher {
    /// Create a file hasher with the default 4 KiB chunk size
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a file hasher with custom options
    pub fn with_options(options: HashOptions) -> Self {
        Self { options }
    }

    /// Create a file hasher with a custom chunk size
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self::with_options(HashOptions::with_chunk_size(chunk_size))
    }

    /// Options used by this hasher
    pub fn options(&self) -> HashOptions {
        self.options
    }

    /// Hash a file without progress reporting or cancellation
    pub async fn hash_file(&self, path: &Path, algorithm: HashAlgorithm) -> Result<HashResult> {
        self.hash_file_with_progress(path, algorithm, &NullProvider, &CancellationToken::new())
            .await
    }

    /// Hash a file, reporting progress after every chunk
    ///
    /// The path is checked before any hashing begins: a missing path fails
    /// with `FileNotFound` and a directory with `NotAFile`. Cancellation is
    /// checked between reads; a cancelled operation drops its file handle and
    /// partial digest state and returns [`Error::Cancelled`].
    pub async fn hash_file_with_progress(
        &self,
        path: &Path,
        algorithm: HashAlgorithm,
        progress_provider: &dyn ProgressProvider,
        cancel: &CancellationToken,
    ) -> Result<HashResult> {
        let start_time = Instant::now();
        self.options.validate()?;

        let (file, file_size) = open_regular_file(path).await?;
        log::debug!(
            "Hashing {} ({file_size} bytes) with {algorithm}, chunk size {}",
            path.display(),
            self.options.chunk_size
        );

        let (digest, bytes_processed) = self
            .digest_reader(file, algorithm, file_size, progress_provider, cancel)
            .await
            .map_err(|err| attach_path(err, path))?;

        let duration = start_time.elapsed();
        log::debug!(
            "Finished {algorithm} of {} in {:.3}s",
            path.display(),
            duration.as_secs_f64()
        );

        Ok(HashResult {
            algorithm,
            digest,
            input_size: bytes_processed,
            duration,
        })
    }

    /// Hash everything an async reader yields until end of stream
    ///
    /// `total_bytes` is only used for progress reports.
    pub async fn hash_reader<R: AsyncRead + Unpin>(
        &self,
        reader: R,
        algorithm: HashAlgorithm,
        total_bytes: u64,
        progress_provider: &dyn ProgressProvider,
        cancel: &CancellationToken,
    ) -> Result<HashResult> {
        let start_time = Instant::now();
        self.options.validate()?;

        let (digest, bytes_processed) = self
            .digest_reader(reader, algorithm, total_bytes, progress_provider, cancel)
            .await?;

        Ok(HashResult {
            algorithm,
            digest,
            input_size: bytes_processed,
            duration: start_time.elapsed(),
        })
    }

    async fn digest_reader<R: AsyncRead + Unpin>(
        &self,
        mut reader: R,
        algorithm: HashAlgorithm,
        total_bytes: u64,
        progress_provider: &dyn ProgressProvider,
        cancel: &CancellationToken,
    ) -> Result<(HashDigest, u64)> {
        let mut hasher = algorithm.to_impl()?.create_hasher();
        let mut buffer = vec![0u8; self.options.chunk_size];
        let mut bytes_processed = 0u64;

        loop {
            if cancel.is_cancelled() {
                log::warn!("{algorithm} hash cancelled after {bytes_processed} bytes");
                progress_provider.report(ProgressUpdate::Status {
                    message: format!("{algorithm} hash cancelled after {bytes_processed} bytes"),
                });
                return Err(Error::Cancelled);
            }

            let n = match reader.read(&mut buffer).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };

            // Only the bytes read in this pass; the tail of the buffer is stale
            hasher.update(&buffer[..n]);
            bytes_processed += n as u64;

            progress_provider.report(ProgressUpdate::HashProgress {
                algorithm,
                bytes_processed,
                total_bytes,
            });
        }

        Ok((hasher.finalize(), bytes_processed))
    }
}

/// Open a path for reading after checking that it names a regular file
async fn open_regular_file(path: &Path) -> Result<(File, u64)> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::Io(IoError::file_not_found(path)));
        }
        Err(err) => return Err(Error::Io(IoError::from_std(err).with_path(path))),
    };

    if !metadata.is_file() {
        return Err(Error::Io(IoError::not_a_file(path)));
    }

    let file = File::open(path)
        .await
        .map_err(|err| Error::Io(IoError::from_std(err).with_path(path)))?;

    Ok((file, metadata.len()))
}

fn attach_path(err: Error, path: &Path) -> Error {
    match err {
        Error::Io(io_err) if io_err.path.is_none() => Error::Io(io_err.with_path(path)),
        other => other,
    }
}

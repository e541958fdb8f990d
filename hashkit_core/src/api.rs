//! High level service API
//!
//! [`HashService`] bundles the configured hasher, letter case and converters
//! behind one handle that user interfaces can share. File hashes can be run
//! inline or on a background task that streams progress back to the caller.

use crate::{
    Error, HashkitConfig, Result,
    cancel::CancellationToken,
    convert::{self, Converter},
    error::{InternalError, ValidationError},
    hashing::{
        FileHasher, HashAlgorithm, HashCalculator, HashOptions, HashResult, digest_matches,
    },
    progress::{ChannelProvider, ProgressProvider, ProgressUpdate},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Entry point for hashing and conversion requests
#[derive(Debug, Clone)]
pub struct HashService {
    config: HashkitConfig,
    calculator: HashCalculator,
    file_hasher: FileHasher,
    exclusive: Arc<AtomicBool>,
}

impl Default for HashService {
    fn default() -> Self {
        Self::new(HashkitConfig::default())
    }
}

impl HashService {
    /// Create a service from configuration
    pub fn new(config: HashkitConfig) -> Self {
        let options = HashOptions::with_chunk_size(config.chunk_size);
        Self {
            calculator: HashCalculator::with_options(options),
            file_hasher: FileHasher::with_options(options),
            exclusive: Arc::new(AtomicBool::new(false)),
            config,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &HashkitConfig {
        &self.config
    }

    /// Calculator sharing this service's options
    pub fn calculator(&self) -> &HashCalculator {
        &self.calculator
    }

    /// Hash the UTF-8 bytes of a string, rendered in the configured case
    pub fn hash_string(&self, algorithm: HashAlgorithm, input: &str) -> Result<String> {
        let result = self.calculator.calculate_str(algorithm, input)?;
        Ok(self.render(&result))
    }

    /// Run a string converter
    pub fn convert(&self, converter: Converter, input: &str) -> Result<String> {
        convert::convert(converter, input)
    }

    /// Hash a file inline, rendered in the configured case
    pub async fn hash_file(&self, path: &Path, algorithm: HashAlgorithm) -> Result<String> {
        let result = self.file_hasher.hash_file(path, algorithm).await?;
        Ok(self.render(&result))
    }

    /// Render a result's digest in the configured case
    pub fn render(&self, result: &HashResult) -> String {
        result.hex(self.config.letter_case)
    }

    /// Compare a rendered digest with an expected value
    pub fn matches_expected(&self, actual: &str, expected: &str) -> bool {
        digest_matches(actual, expected)
    }

    /// Hash a file on a background task
    ///
    /// Must be called from within a tokio runtime. Any number of spawned
    /// jobs may run at once.
    pub fn spawn_file_hash(
        &self,
        path: impl Into<PathBuf>,
        algorithm: HashAlgorithm,
    ) -> FileHashJob {
        self.spawn_job(path.into(), algorithm, None)
    }

    /// Hash a file on a background task unless an exclusive job is running
    ///
    /// Fails with `OperationInProgress` while a previous exclusive job has not
    /// finished. The slot is released when that job's task ends, whether it
    /// succeeded, failed, was cancelled or panicked.
    pub fn try_spawn_exclusive(
        &self,
        path: impl Into<PathBuf>,
        algorithm: HashAlgorithm,
    ) -> Result<FileHashJob> {
        if self
            .exclusive
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::debug!("Rejecting exclusive hash request: another job is in flight");
            return Err(Error::Validation(ValidationError::OperationInProgress));
        }

        let guard = ExclusiveGuard(Arc::clone(&self.exclusive));
        Ok(self.spawn_job(path.into(), algorithm, Some(guard)))
    }

    /// Whether an exclusive job is currently in flight
    pub fn is_busy(&self) -> bool {
        self.exclusive.load(Ordering::Acquire)
    }

    fn spawn_job(
        &self,
        path: PathBuf,
        algorithm: HashAlgorithm,
        guard: Option<ExclusiveGuard>,
    ) -> FileHashJob {
        let (provider, progress) = ChannelProvider::channel(self.config.progress_capacity);
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let hasher = self.file_hasher.clone();

        let handle = tokio::spawn(async move {
            let _guard = guard;
            let result = hasher
                .hash_file_with_progress(&path, algorithm, &provider, &task_cancel)
                .await;
            provider.complete();
            result
        });

        FileHashJob {
            handle,
            progress: Some(progress),
            cancel,
        }
    }
}

/// Clears the exclusive flag when dropped
struct ExclusiveGuard(Arc<AtomicBool>);

impl Drop for ExclusiveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Handle to a file hash running on a background task
#[derive(Debug)]
pub struct FileHashJob {
    handle: JoinHandle<Result<HashResult>>,
    progress: Option<mpsc::Receiver<ProgressUpdate>>,
    cancel: CancellationToken,
}

impl FileHashJob {
    /// Take the progress receiver
    ///
    /// The channel closes once the job ends. Returns `None` after the first
    /// call.
    pub fn take_progress(&mut self) -> Option<mpsc::Receiver<ProgressUpdate>> {
        self.progress.take()
    }

    /// Request cancellation; the job ends with [`Error::Cancelled`]
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token controlling this job
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether the background task has ended
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the job's result
    pub async fn wait(self) -> Result<HashResult> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) => Err(Error::Internal(InternalError::worker(err.to_string()))),
        }
    }
}

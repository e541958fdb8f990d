//! Progress reporting abstractions
//!
//! The hashing engine reports through [`ProgressProvider`] without knowing
//! whether the updates end up in a channel, a log, or nowhere.

use crate::hashing::HashAlgorithm;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Core trait for progress reporting
pub trait ProgressProvider: Send + Sync {
    /// Report a progress update
    fn report(&self, update: ProgressUpdate);

    /// Signal that the operation is complete
    fn complete(&self);
}

/// Unified progress update type
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressUpdate {
    /// Hash calculation progress, sent after every chunk
    HashProgress {
        algorithm: HashAlgorithm,
        bytes_processed: u64,
        total_bytes: u64,
    },

    /// Generic status message
    Status { message: String },
}

impl ProgressUpdate {
    /// Completion percentage for hash progress updates
    pub fn percentage(&self) -> Option<f64> {
        match self {
            ProgressUpdate::HashProgress {
                bytes_processed,
                total_bytes,
                ..
            } => Some(if *total_bytes > 0 {
                (*bytes_processed as f64 / *total_bytes as f64) * 100.0
            } else {
                100.0
            }),
            ProgressUpdate::Status { .. } => None,
        }
    }
}

/// Null implementation for when no progress is needed
pub struct NullProvider;

impl ProgressProvider for NullProvider {
    fn report(&self, _update: ProgressUpdate) {
        // No-op: discard all progress updates
    }

    fn complete(&self) {
        // No-op
    }
}

/// Channel-based progress provider
///
/// Updates are sent with `try_send`: when the receiver falls behind, updates
/// are dropped rather than stalling the hashing loop.
pub struct ChannelProvider {
    tx: Mutex<Option<mpsc::Sender<ProgressUpdate>>>,
}

impl ChannelProvider {
    /// Create a new channel provider
    pub fn new(tx: mpsc::Sender<ProgressUpdate>) -> Self {
        Self {
            tx: Mutex::new(Some(tx)),
        }
    }

    /// Create a provider together with the receiving end of its channel
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ProgressUpdate>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }
}

impl ProgressProvider for ChannelProvider {
    fn report(&self, update: ProgressUpdate) {
        let tx_opt = match self.tx.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        if let Some(tx) = tx_opt {
            let _ = tx.try_send(update);
        }
    }

    fn complete(&self) {
        // Drop our sender so the receiver's loop can end
        if let Ok(mut guard) = self.tx.lock() {
            *guard = None;
        }
    }
}

//! Concurrency gate bounding simultaneous job execution.
//!
//! A thin wrapper around a counting semaphore. Every job acquires a slot
//! before invoking the external agent and holds the returned permit for the
//! duration of the call; dropping the permit returns the slot on every exit
//! path, including panics and cancellation.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::BatchError;

/// Caps the number of jobs executing simultaneously.
///
/// Cloning is cheap; all clones share the same slot counter.
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

impl ConcurrencyGate {
    /// Create a gate with `limit` execution slots.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidLimit`] when `limit` is zero. A zero-slot
    /// gate would deadlock every submission, so it is rejected before any job
    /// is spawned rather than clamped to some default.
    pub fn new(limit: usize) -> Result<Self, BatchError> {
        if limit == 0 {
            return Err(BatchError::InvalidLimit(limit));
        }
        Ok(Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        })
    }

    /// Wait for a free slot and reserve it.
    ///
    /// The permit releases its slot when dropped, so callers bind it for the
    /// scope of the job instead of releasing manually.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit, BatchError> {
        self.semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| BatchError::GateClosed)
    }

    /// The configured maximum number of in-flight jobs.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

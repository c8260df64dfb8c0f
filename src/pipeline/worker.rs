//! Worker thread logic for the work-distribution pipeline
//!
//! Each worker:
//! - Pulls jobs from the shared inbound queue
//! - Applies the classifier to each work item
//! - Sends qualifying outputs to the result queue
//! - Emits exactly one completion signal at end of life, then stops
//!
//! A worker that dequeues the shutdown marker never re-enters its
//! processing loop: the only transition is running -> stopped.

use crate::error::WorkerError;
use crate::pipeline::queue::{Delivery, Job, JobReceiver, ResultSender};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Statistics collected by a worker
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Work items pulled from the inbound queue
    pub items_processed: AtomicU64,

    /// Outputs sent to the result queue
    pub outputs_emitted: AtomicU64,

    /// Items the classifier rejected
    pub items_discarded: AtomicU64,
}

impl WorkerStats {
    fn record_item(&self) {
        self.items_processed.fetch_add(1, Ordering::Relaxed);
    }

    fn record_output(&self) {
        self.outputs_emitted.fetch_add(1, Ordering::Relaxed);
    }

    fn record_discard(&self) {
        self.items_discarded.fetch_add(1, Ordering::Relaxed);
    }
}

/// A worker thread that classifies work items
pub struct Worker {
    /// Worker ID
    id: usize,

    /// Thread handle
    handle: Option<JoinHandle<()>>,

    /// Worker statistics
    stats: Arc<WorkerStats>,
}

impl Worker {
    /// Spawn a new worker thread
    ///
    /// The classifier is shared across all workers of a pool; `Some`
    /// outputs are forwarded to the result queue, `None` items are
    /// discarded.
    pub fn spawn<T, R, F>(
        id: usize,
        classify: Arc<F>,
        jobs: JobReceiver<T>,
        results: ResultSender<R>,
    ) -> Result<Self, WorkerError>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Option<R> + Send + Sync + 'static,
    {
        let stats = Arc::new(WorkerStats::default());
        let stats_clone = Arc::clone(&stats);

        let handle = thread::Builder::new()
            .name(format!("sieve-worker-{}", id))
            .spawn(move || worker_loop(id, classify, jobs, results, stats_clone))
            .map_err(|e| WorkerError::InitFailed {
                id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            handle: Some(handle),
            stats,
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get worker statistics
    pub fn stats(&self) -> &WorkerStats {
        &self.stats
    }

    /// Wait for the worker to finish
    pub fn join(mut self) -> Result<(), WorkerError> {
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| WorkerError::Panicked { id: self.id })
        } else {
            Ok(())
        }
    }
}

/// Emits the completion signal when dropped
///
/// Constructed at the top of the worker loop so that every exit path
/// delivers exactly one `Delivery::Finished` to the coordinator, even
/// when the classifier panics.
struct CompletionGuard<R> {
    id: usize,
    results: ResultSender<R>,
}

impl<R> CompletionGuard<R> {
    fn new(id: usize, results: ResultSender<R>) -> Self {
        Self { id, results }
    }
}

impl<R> Drop for CompletionGuard<R> {
    fn drop(&mut self) {
        if self.results.send(Delivery::Finished).is_err() {
            warn!(worker = self.id, "Result queue gone, completion signal lost");
        }
    }
}

/// Main worker loop
fn worker_loop<T, R, F>(
    id: usize,
    classify: Arc<F>,
    jobs: JobReceiver<T>,
    results: ResultSender<R>,
    stats: Arc<WorkerStats>,
) where
    F: Fn(T) -> Option<R>,
{
    let _guard = CompletionGuard::new(id, results.clone());

    debug!(worker = id, "Worker starting");

    loop {
        match jobs.recv() {
            Some(Job::Item(item)) => {
                stats.record_item();
                match classify(item) {
                    Some(output) => {
                        if results.send(Delivery::Output(output)).is_err() {
                            warn!(worker = id, "Result queue closed, stopping");
                            return;
                        }
                        stats.record_output();
                    }
                    None => stats.record_discard(),
                }
            }
            Some(Job::Shutdown) => {
                debug!(
                    worker = id,
                    items = stats.items_processed.load(Ordering::Relaxed),
                    outputs = stats.outputs_emitted.load(Ordering::Relaxed),
                    "Worker shutting down"
                );
                return;
            }
            None => {
                // All job senders dropped without a shutdown marker
                warn!(worker = id, "Job queue disconnected before shutdown");
                return;
            }
        }
    }
}

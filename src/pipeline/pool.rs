//! Worker pool owning the queues and the worker set
//!
//! The pool launches a fixed number of workers over one shared job queue
//! and one shared result queue, then drives the sentinel shutdown
//! protocol: all work is submitted first, then exactly one shutdown
//! marker per worker. The coordinator depends on that one-to-one match
//! to count completions.

use crate::error::{ConfigError, Result, WorkerError};
use crate::pipeline::queue::{Job, JobQueue, QueueStats, ResultQueue, ResultReceiver};
use crate::pipeline::worker::Worker;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Aggregated statistics across all workers of a pool
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Work items pulled from the job queue
    pub items_processed: u64,

    /// Outputs sent to the result queue
    pub outputs_emitted: u64,

    /// Items the classifier rejected
    pub items_discarded: u64,
}

/// Manages the lifecycle of N workers sharing a queue pair
pub struct WorkerPool<T, R> {
    /// Inbound queue of work items and shutdown markers
    jobs: JobQueue<T>,

    /// Outbound queue of outputs and completion signals
    results: ResultQueue<R>,

    /// Worker threads
    workers: Vec<Worker>,
}

impl<T, R> WorkerPool<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    /// Create a pool with an unbounded job queue, or a bounded one when a
    /// capacity is given
    pub fn new(queue_capacity: Option<usize>) -> Self {
        let jobs = match queue_capacity {
            Some(capacity) => JobQueue::with_capacity(capacity),
            None => JobQueue::unbounded(),
        };

        // The result queue stays unbounded: a worker blocked on a full
        // result queue while submit() holds a full job queue would
        // deadlock the run.
        Self {
            jobs,
            results: ResultQueue::unbounded(),
            workers: Vec::new(),
        }
    }

    /// Launch exactly `count` workers sharing the pool's queues
    ///
    /// Fails fast before any thread is spawned when `count` is zero or
    /// exceeds the available parallelism. The shutdown protocol requires
    /// the launched count to match the sentinel count exactly, so a
    /// partially started pool is never left behind.
    pub fn start<F>(&mut self, count: usize, classify: F) -> Result<()>
    where
        F: Fn(T) -> Option<R> + Send + Sync + 'static,
    {
        let max = num_cpus::get();
        if count == 0 || count > max {
            return Err(ConfigError::InvalidWorkerCount { count, max }.into());
        }

        debug_assert!(self.workers.is_empty(), "start() called on a running pool");

        let classify = Arc::new(classify);
        for id in 0..count {
            let worker = Worker::spawn(
                id,
                Arc::clone(&classify),
                self.jobs.receiver(),
                self.results.sender(),
            )?;
            self.workers.push(worker);
        }

        info!(count = self.workers.len(), "Workers started");
        Ok(())
    }

    /// Enqueue work items in the given order
    ///
    /// Returns the number of items submitted. Blocks while a bounded job
    /// queue is full.
    pub fn submit<I>(&self, items: I) -> Result<u64>
    where
        I: IntoIterator<Item = T>,
    {
        let sender = self.jobs.sender();
        let mut submitted = 0u64;

        for item in items {
            sender
                .send(Job::Item(item))
                .map_err(|_| WorkerError::JobQueueClosed)?;
            submitted += 1;
        }

        debug!(submitted, "Work submitted");
        Ok(submitted)
    }

    /// Enqueue exactly one shutdown marker per started worker
    ///
    /// Must be called after all work has been submitted: a worker that
    /// consumes a marker stops for good, so markers enqueued early would
    /// starve the remaining items.
    pub fn shutdown(&self) -> Result<()> {
        let sender = self.jobs.sender();

        for _ in 0..self.workers.len() {
            sender
                .send(Job::Shutdown)
                .map_err(|_| WorkerError::JobQueueClosed)?;
        }

        debug!(markers = self.workers.len(), "Shutdown markers enqueued");
        Ok(())
    }

    /// Number of started workers
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Receiver handle for draining the result queue
    pub fn results(&self) -> ResultReceiver<R> {
        self.results.receiver()
    }

    /// Statistics of the job queue
    pub fn job_stats(&self) -> Arc<QueueStats> {
        self.jobs.stats()
    }

    /// Aggregate statistics across all workers
    pub fn aggregate_stats(&self) -> PoolStats {
        let mut stats = PoolStats::default();

        for worker in &self.workers {
            stats.items_processed += worker.stats().items_processed.load(Ordering::Relaxed);
            stats.outputs_emitted += worker.stats().outputs_emitted.load(Ordering::Relaxed);
            stats.items_discarded += worker.stats().items_discarded.load(Ordering::Relaxed);
        }

        stats
    }

    /// Join all workers, collecting the errors of those that exited
    /// uncleanly
    pub fn join(&mut self) -> Vec<WorkerError> {
        let workers = std::mem::take(&mut self.workers);
        let mut errors = Vec::new();

        for worker in workers {
            if let Err(e) = worker.join() {
                warn!(error = %e, "Worker failed to join cleanly");
                errors.push(e);
            }
        }

        errors
    }
}

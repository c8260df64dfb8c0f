//! Run coordinator - orchestrates a work-distribution run
//!
//! The coordinator is responsible for:
//! - Starting the worker pool
//! - Submitting all work, then the shutdown markers
//! - Draining the result queue while counting completion signals
//! - Joining the workers and producing the final report
//!
//! The drain loop never busy-waits: every iteration blocks on the result
//! queue until a message arrives. It terminates because each worker emits
//! exactly one completion signal, and the queue delivers every message
//! exactly once.

use crate::error::{Result, WorkerError};
use crate::pipeline::pool::WorkerPool;
use crate::pipeline::queue::Delivery;
use crossbeam_channel::RecvTimeoutError;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of a completed run
#[derive(Debug)]
pub struct RunReport<R> {
    /// Outputs collected from the result queue, in arrival order
    ///
    /// Arrival order is nondeterministic across workers; treat this as a
    /// set.
    pub outputs: Vec<R>,

    /// Work items submitted to the job queue
    pub submitted: u64,

    /// Workers that reported completion (always the full pool size on a
    /// successful run)
    pub workers_completed: usize,

    /// Workers that panicked during the run
    pub workers_panicked: usize,

    /// Work items pulled from the job queue across all workers
    pub items_processed: u64,

    /// Items the classifier rejected
    pub items_discarded: u64,

    /// Wall-clock time for the run
    pub duration: Duration,
}

/// Coordinates one submit-classify-drain run over a worker pool
pub struct Coordinator<T, R> {
    /// Pool owning the queues and workers
    pool: WorkerPool<T, R>,

    /// Number of workers to launch
    worker_count: usize,

    /// Bound on each blocking receive in the drain loop
    ///
    /// `None` blocks indefinitely, replicating the pure sentinel
    /// protocol with no worker-loss detection.
    stall_timeout: Option<Duration>,
}

impl<T, R> Coordinator<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    /// Create a new coordinator
    pub fn new(
        worker_count: usize,
        queue_capacity: Option<usize>,
        stall_timeout: Option<Duration>,
    ) -> Self {
        Self {
            pool: WorkerPool::new(queue_capacity),
            worker_count,
            stall_timeout,
        }
    }

    /// Run the pipeline to completion
    ///
    /// Starts the workers, submits every item, enqueues the shutdown
    /// markers, then drains the result queue until all workers have
    /// reported completion.
    pub fn run<F, I>(mut self, classify: F, items: I) -> Result<RunReport<R>>
    where
        F: Fn(T) -> Option<R> + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        let start = Instant::now();

        info!(workers = self.worker_count, "Starting run");

        self.pool.start(self.worker_count, classify)?;
        let submitted = self.pool.submit(items)?;
        self.pool.shutdown()?;

        let (outputs, completed) = self.drain()?;
        debug_assert_eq!(completed, self.worker_count);

        // Read worker stats before joining; join consumes the workers
        let stats = self.pool.aggregate_stats();
        let join_errors = self.pool.join();
        let duration = start.elapsed();

        info!(
            submitted,
            outputs = outputs.len(),
            workers = completed,
            duration_ms = duration.as_millis() as u64,
            "Run completed"
        );

        Ok(RunReport {
            outputs,
            submitted,
            workers_completed: completed,
            workers_panicked: join_errors.len(),
            items_processed: stats.items_processed,
            items_discarded: stats.items_discarded,
            duration,
        })
    }

    /// Drain the result queue until every worker has reported completion
    fn drain(&self) -> Result<(Vec<R>, usize)> {
        let receiver = self.pool.results();
        let mut outputs = Vec::new();
        let mut completed = 0usize;

        while completed < self.worker_count {
            let delivery = match self.stall_timeout {
                Some(timeout) => match receiver.recv_timeout(timeout) {
                    Ok(delivery) => delivery,
                    Err(RecvTimeoutError::Timeout) => {
                        warn!(
                            completed,
                            expected = self.worker_count,
                            "Result queue went silent"
                        );
                        return Err(WorkerError::Stalled {
                            completed,
                            expected: self.worker_count,
                            waited_secs: timeout.as_secs(),
                        }
                        .into());
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        return Err(WorkerError::ResultChannelClosed.into());
                    }
                },
                None => receiver
                    .recv()
                    .ok_or(WorkerError::ResultChannelClosed)?,
            };

            match delivery {
                Delivery::Output(output) => outputs.push(output),
                Delivery::Finished => {
                    completed += 1;
                    debug!(completed, expected = self.worker_count, "Worker finished");
                }
            }
        }

        Ok((outputs, completed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SieveError;
    use std::thread;

    #[test]
    fn test_run_collects_outputs_and_completions() {
        let coordinator = Coordinator::new(1, None, None);
        let report = coordinator
            .run(|n: u64| (n % 2 == 0).then_some(n), 0..10u64)
            .unwrap();

        assert_eq!(report.submitted, 10);
        assert_eq!(report.workers_completed, 1);
        assert_eq!(report.workers_panicked, 0);
        assert_eq!(report.items_processed, 10);
        assert_eq!(report.items_discarded, 5);

        let mut outputs = report.outputs;
        outputs.sort_unstable();
        assert_eq!(outputs, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_empty_submission_still_completes() {
        let workers = 2.min(num_cpus::get());
        let coordinator = Coordinator::new(workers, None, None);
        let report = coordinator
            .run(Some, std::iter::empty::<u64>())
            .unwrap();

        assert_eq!(report.submitted, 0);
        assert_eq!(report.workers_completed, workers);
        assert!(report.outputs.is_empty());
    }

    #[test]
    fn test_stalled_run_surfaces_worker_loss() {
        let coordinator = Coordinator::new(1, None, Some(Duration::from_millis(100)));
        let err = coordinator
            .run(
                |_: u64| -> Option<u64> {
                    thread::sleep(Duration::from_secs(600));
                    None
                },
                [1u64],
            )
            .unwrap_err();

        assert!(matches!(
            err,
            SieveError::Worker(WorkerError::Stalled {
                completed: 0,
                expected: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_panicked_worker_does_not_hang_the_run() {
        let coordinator = Coordinator::new(1, None, Some(Duration::from_secs(10)));
        let report = coordinator
            .run(|_: u64| -> Option<u64> { panic!("classifier failure") }, [7u64])
            .unwrap();

        assert_eq!(report.workers_completed, 1);
        assert_eq!(report.workers_panicked, 1);
        assert!(report.outputs.is_empty());
    }
}

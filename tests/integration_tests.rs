//! Integration tests for range-sieve
//!
//! End-to-end runs of the pipeline with the trial-division classifier,
//! plus the shutdown-protocol properties the coordinator depends on.

use range_sieve::error::{ConfigError, SieveError, WorkerError};
use range_sieve::pipeline::{Coordinator, Delivery, WorkerPool};
use range_sieve::primes;
use std::time::Duration;

/// Run the prime scan over `[start, end)` and return the sorted primes
fn scan(start: u64, end: u64, workers: usize) -> Vec<u64> {
    let coordinator = Coordinator::new(workers, None, Some(Duration::from_secs(30)));
    let report = coordinator.run(primes::classify, start..end).unwrap();
    assert_eq!(report.workers_completed, workers);

    let mut found = report.outputs;
    found.sort_unstable();
    found
}

#[test]
fn test_canonical_range_finds_97() {
    // 91 = 7x13, 93 = 3x31, 95 = 5x19, 99 = 9x11
    let workers = 2.min(num_cpus::get());
    assert_eq!(scan(90, 100, workers), vec![97]);
}

#[test]
fn test_prime_set_is_independent_of_worker_count() {
    let single = scan(1_000, 2_000, 1);
    let multi = scan(1_000, 2_000, 8.min(num_cpus::get()));

    assert!(!single.is_empty());
    assert_eq!(single, multi);
}

#[test]
fn test_two_is_reported_non_prime() {
    // Documented even-rejection contract
    assert_eq!(scan(2, 3, 1), Vec::<u64>::new());
}

#[test]
fn test_completion_count_matches_workers() {
    for workers in 1..=4.min(num_cpus::get()) {
        let coordinator = Coordinator::new(workers, None, Some(Duration::from_secs(30)));
        let report = coordinator.run(primes::classify, 0..200u64).unwrap();

        assert_eq!(report.workers_completed, workers);
        assert_eq!(report.submitted, 200);
        assert_eq!(report.items_processed, 200);
    }
}

#[test]
fn test_bounded_queue_run_matches_unbounded() {
    let coordinator = Coordinator::new(1, Some(8), None);
    let report = coordinator.run(primes::classify, 90..100u64).unwrap();

    let mut found = report.outputs;
    found.sort_unstable();
    assert_eq!(found, vec![97]);
}

#[test]
fn test_invalid_worker_counts_fail_before_launch() {
    let mut pool = WorkerPool::<u64, u64>::new(None);
    let err = pool.start(0, primes::classify).unwrap_err();
    assert!(matches!(
        err,
        SieveError::Config(ConfigError::InvalidWorkerCount { count: 0, .. })
    ));

    let mut pool = WorkerPool::<u64, u64>::new(None);
    let err = pool.start(num_cpus::get() + 1, primes::classify).unwrap_err();
    assert!(matches!(
        err,
        SieveError::Config(ConfigError::InvalidWorkerCount { .. })
    ));

    // Nothing was launched and nothing was enqueued
    assert_eq!(pool.worker_count(), 0);
    assert_eq!(pool.job_stats().enqueued(), 0);
}

#[test]
fn test_one_sentinel_per_worker() {
    let workers = 2.min(num_cpus::get());
    let mut pool = WorkerPool::<u64, u64>::new(None);
    pool.start(workers, primes::classify).unwrap();

    let submitted = pool.submit(90..100).unwrap();
    pool.shutdown().unwrap();

    // Everything on the job queue is either a work item or one of the
    // exactly-one-per-worker shutdown markers
    assert_eq!(pool.job_stats().enqueued(), submitted + workers as u64);

    let receiver = pool.results();
    let mut finished = 0;
    let mut outputs = Vec::new();
    while finished < workers {
        match receiver.recv().unwrap() {
            Delivery::Finished => finished += 1,
            Delivery::Output(p) => outputs.push(p),
        }
    }

    assert_eq!(finished, workers);
    outputs.sort_unstable();
    assert_eq!(outputs, vec![97]);

    // Every enqueued job was consumed: items plus one sentinel per worker
    assert_eq!(pool.job_stats().dequeued(), submitted + workers as u64);
    assert!(pool.join().is_empty());
}

#[test]
fn test_empty_range_submission_completes() {
    let workers = 2.min(num_cpus::get());
    let coordinator = Coordinator::new(workers, None, Some(Duration::from_secs(30)));
    let report = coordinator
        .run(primes::classify, std::iter::empty::<u64>())
        .unwrap();

    assert_eq!(report.submitted, 0);
    assert_eq!(report.workers_completed, workers);
    assert!(report.outputs.is_empty());
}

#[test]
fn test_panicking_classifier_does_not_hang() {
    let coordinator = Coordinator::new(1, None, Some(Duration::from_secs(30)));
    let report = coordinator
        .run(
            |_: u64| -> Option<u64> { panic!("classifier failure") },
            [41u64],
        )
        .unwrap();

    assert_eq!(report.workers_completed, 1);
    assert_eq!(report.workers_panicked, 1);
    assert!(report.outputs.is_empty());
}

#[test]
fn test_stall_detection_reports_worker_loss() {
    let coordinator = Coordinator::new(1, None, Some(Duration::from_millis(100)));
    let err = coordinator
        .run(
            |_: u64| -> Option<u64> {
                std::thread::sleep(Duration::from_secs(600));
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
fn test_discard_accounting() {
    let coordinator = Coordinator::new(1, None, None);
    let report = coordinator.run(primes::classify, 90..100u64).unwrap();

    // One prime emitted, nine candidates discarded
    assert_eq!(report.items_processed, 10);
    assert_eq!(report.items_discarded, 9);
    assert_eq!(report.outputs.len(), 1);
}

//! Configuration types for range-sieve
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use std::time::Duration;

/// Canonical candidate range scanned when no range is given
const DEFAULT_RANGE_START: u64 = 100_000_000;
const DEFAULT_RANGE_END: u64 = 101_000_000;

/// Default bound on each blocking receive while draining results
const DEFAULT_STALL_TIMEOUT_SECS: u64 = 30;

/// Parallel prime scanner over an integer range
#[derive(Parser, Debug, Clone)]
#[command(
    name = "range-sieve",
    version,
    about = "Parallel prime scanner over an integer range",
    long_about = "Scans the candidate range [START, END) for primes by trial division,\n\
                  distributing candidates across a pool of worker threads through a\n\
                  shared work queue. Workers stop on an in-band poison pill, one per\n\
                  worker, and report completion the same way.",
    after_help = "EXAMPLES:\n    \
        range-sieve                          # canonical range, one worker per core\n    \
        range-sieve 90 100 -w 2\n    \
        range-sieve 100000000 101000000 -w 8 --queue-size 10000\n    \
        range-sieve 2 1000000 --stall-timeout 0   # wait forever, never fail fast"
)]
pub struct CliArgs {
    /// Start of the candidate range (inclusive)
    #[arg(value_name = "START", default_value_t = DEFAULT_RANGE_START)]
    pub start: u64,

    /// End of the candidate range (exclusive)
    #[arg(value_name = "END", default_value_t = DEFAULT_RANGE_END)]
    pub end: u64,

    /// Number of worker threads
    #[arg(
        short = 'w',
        long,
        default_value_t = default_workers(),
        value_name = "NUM"
    )]
    pub workers: usize,

    /// Work queue capacity (unbounded if not set)
    #[arg(long, value_name = "NUM")]
    pub queue_size: Option<usize>,

    /// Seconds to wait on a silent result queue before failing (0 = wait forever)
    #[arg(long, default_value_t = DEFAULT_STALL_TIMEOUT_SECS, value_name = "SECS")]
    pub stall_timeout: u64,

    /// Quiet mode - suppress progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

fn default_workers() -> usize {
    // CPU-bound workload, one worker per core
    num_cpus::get()
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct SieveConfig {
    /// Start of the candidate range (inclusive)
    pub start: u64,

    /// End of the candidate range (exclusive)
    pub end: u64,

    /// Number of worker threads
    pub worker_count: usize,

    /// Work queue capacity, `None` for unbounded
    pub queue_capacity: Option<usize>,

    /// Drain-loop stall bound, `None` to block indefinitely
    pub stall_timeout: Option<Duration>,

    /// Show progress indicator
    pub show_progress: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl SieveConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let max = num_cpus::get();
        if args.workers == 0 || args.workers > max {
            return Err(ConfigError::InvalidWorkerCount {
                count: args.workers,
                max,
            });
        }

        if args.start >= args.end {
            return Err(ConfigError::EmptyRange {
                start: args.start,
                end: args.end,
            });
        }

        if args.queue_size == Some(0) {
            return Err(ConfigError::InvalidQueueCapacity { size: 0 });
        }

        let stall_timeout =
            (args.stall_timeout > 0).then(|| Duration::from_secs(args.stall_timeout));

        Ok(Self {
            start: args.start,
            end: args.end,
            worker_count: args.workers,
            queue_capacity: args.queue_size,
            stall_timeout,
            show_progress: !args.quiet,
            verbose: args.verbose,
        })
    }

    /// Number of candidates in the range
    pub fn candidate_count(&self) -> u64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            start: 90,
            end: 100,
            workers: 1,
            queue_size: None,
            stall_timeout: 30,
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = SieveConfig::from_args(base_args()).unwrap();
        assert_eq!(config.start, 90);
        assert_eq!(config.end, 100);
        assert_eq!(config.candidate_count(), 10);
        assert_eq!(config.stall_timeout, Some(Duration::from_secs(30)));
        assert!(config.show_progress);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut args = base_args();
        args.workers = 0;

        let err = SieveConfig::from_args(args).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidWorkerCount { count: 0, .. }
        ));
    }

    #[test]
    fn test_oversubscribed_workers_rejected() {
        let mut args = base_args();
        args.workers = num_cpus::get() + 1;

        let err = SieveConfig::from_args(args).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorkerCount { .. }));
    }

    #[test]
    fn test_empty_range_rejected() {
        let mut args = base_args();
        args.start = 100;
        args.end = 100;

        let err = SieveConfig::from_args(args).unwrap_err();
        assert_eq!(
            err,
            ConfigError::EmptyRange {
                start: 100,
                end: 100
            }
        );

        let mut args = base_args();
        args.start = 200;
        args.end = 100;
        assert!(SieveConfig::from_args(args).is_err());
    }

    #[test]
    fn test_zero_queue_capacity_rejected() {
        let mut args = base_args();
        args.queue_size = Some(0);

        let err = SieveConfig::from_args(args).unwrap_err();
        assert_eq!(err, ConfigError::InvalidQueueCapacity { size: 0 });
    }

    #[test]
    fn test_zero_stall_timeout_disables_detection() {
        let mut args = base_args();
        args.stall_timeout = 0;

        let config = SieveConfig::from_args(args).unwrap();
        assert_eq!(config.stall_timeout, None);
    }
}

//! Error types for range-sieve
//!
//! This module defines the error hierarchy covering:
//! - Configuration and CLI errors
//! - Worker thread and pipeline errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Errors should be actionable - include context about what to do
//! - Validation errors are raised before any worker starts, so a failed
//!   run has no side effects

use thiserror::Error;

/// Top-level error type for the range-sieve application
#[derive(Error, Debug)]
pub enum SieveError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker/pipeline errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),
}

/// Configuration and CLI errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// The candidate range contains no values
    #[error("Empty candidate range [{start}, {end}): start must be below end")]
    EmptyRange { start: u64, end: u64 },

    /// Invalid inbound queue capacity
    #[error("Invalid queue capacity {size}: must be at least 1 (omit for unbounded)")]
    InvalidQueueCapacity { size: usize },
}

/// Worker thread and pipeline errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker initialization failed
    #[error("Failed to initialize worker {id}: {reason}")]
    InitFailed { id: usize, reason: String },

    /// Worker panicked
    #[error("Worker {id} panicked")]
    Panicked { id: usize },

    /// The result queue went silent before every worker reported completion
    #[error(
        "No result within {waited_secs}s: {completed} of {expected} workers reported completion"
    )]
    Stalled {
        completed: usize,
        expected: usize,
        waited_secs: u64,
    },

    /// Result channel closed before all completions were drained
    #[error("Result channel closed before all workers reported completion")]
    ResultChannelClosed,

    /// Job queue closed unexpectedly
    #[error("Job queue closed unexpectedly")]
    JobQueueClosed,
}

/// Result type alias for SieveError
pub type Result<T> = std::result::Result<T, SieveError>;

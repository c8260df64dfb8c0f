//! range-sieve - Parallel Prime Scanner
//!
//! Scans an integer range for primes by trial division, distributing
//! candidates across a fixed pool of worker threads. The work-distribution
//! pipeline underneath is generic: any `Fn(T) -> Option<R>` classifier can
//! be run over any stream of items with the same queue and shutdown
//! machinery.
//!
//! # Features
//!
//! - **Sentinel shutdown**: control flows in-band as tagged enum variants,
//!   one poison pill per worker, answered by one completion signal per
//!   worker. No shared flags, no polling.
//!
//! - **Message passing only**: the two queues are the only shared mutable
//!   state on the work path; all coordination happens through them.
//!
//! - **Fail fast**: worker counts are validated against the available
//!   parallelism before any thread starts, and a silent result queue
//!   surfaces worker loss as an error instead of hanging the drain loop.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Coordinator                           │
//! │   submit candidates → enqueue poison pills → drain results  │
//! └────────────┬───────────────────────────────▲────────────────┘
//!              │ JobQueue                      │ ResultQueue
//!              ▼                               │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Worker Pool                           │
//! │   ┌──────────┐  ┌──────────┐        ┌──────────┐            │
//! │   │ Worker 1 │  │ Worker 2 │  ...   │ Worker N │            │
//! │   │ classify │  │ classify │        │ classify │            │
//! │   └──────────┘  └──────────┘        └──────────┘            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Canonical range, one worker per core
//! range-sieve
//!
//! # Small range, two workers
//! range-sieve 90 100 -w 2
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod primes;
pub mod progress;

pub use config::{CliArgs, SieveConfig};
pub use error::{Result, SieveError};
pub use pipeline::{Coordinator, RunReport, WorkerPool};

//! Bounded work-distribution pipeline
//!
//! A fixed pool of worker threads pulls work items from a shared job
//! queue, classifies each one, and pushes qualifying outputs to a shared
//! result queue. Shutdown is signalled in-band: one poison pill per
//! worker, answered by one completion signal per worker.
//!
//! # Architecture
//!
//! ```text
//!                  ┌──────────────────────────┐
//!                  │       Coordinator        │
//!                  │  submit → shutdown →     │
//!                  │  drain completions       │
//!                  └──────┬──────────▲────────┘
//!                         │          │
//!                 Job::Item(n)       │ Delivery::Output(r)
//!                 Job::Shutdown      │ Delivery::Finished
//!                         │          │
//!                  ┌──────▼──────────┴────────┐
//!                  │   JobQueue / ResultQueue │
//!                  │   (crossbeam channels)   │
//!                  └──────┬──────────▲────────┘
//!                         │          │
//!        ┌────────────┬───┴────────┬─┴──────────┐
//!  ┌─────▼─────┐ ┌────▼──────┐ ┌──▼────────┐    │
//!  │  Worker 1 │ │  Worker 2 │ │  Worker N │ ───┘
//!  │  classify │ │  classify │ │  classify │
//!  └───────────┘ └───────────┘ └───────────┘
//! ```

pub mod coordinator;
pub mod pool;
pub mod queue;
pub mod worker;

pub use coordinator::{Coordinator, RunReport};
pub use pool::{PoolStats, WorkerPool};
pub use queue::{
    Delivery, Job, JobQueue, JobReceiver, JobSender, QueueStats, ResultQueue, ResultReceiver,
    ResultSender,
};
pub use worker::{Worker, WorkerStats};

//! Job and result queues for the work-distribution pipeline
//!
//! This module provides the two channels every run is built on: an inbound
//! job queue (single producer, N worker consumers) and an outbound result
//! queue (N worker producers, single consumer). Shutdown and completion are
//! carried in-band as enum variants, so a control marker can never collide
//! with a legitimate work item or result value.

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A message on the inbound queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job<T> {
    /// A work item to classify
    Item(T),

    /// Poison pill: the consuming worker must emit its completion signal
    /// and stop. Enqueued exactly once per worker.
    Shutdown,
}

/// A message on the outbound queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery<R> {
    /// A worker product
    Output(R),

    /// Completion signal: the sending worker has stopped consuming.
    /// Emitted exactly once per worker, after its last output.
    Finished,
}

/// Statistics shared by all handles of one queue
#[derive(Debug, Default)]
pub struct QueueStats {
    /// Total messages enqueued
    pub enqueued: AtomicU64,

    /// Total messages dequeued
    pub dequeued: AtomicU64,
}

impl QueueStats {
    /// Messages enqueued so far
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    /// Messages dequeued so far
    pub fn dequeued(&self) -> u64 {
        self.dequeued.load(Ordering::Relaxed)
    }
}

/// Inbound queue carrying work items and shutdown markers to the workers
pub struct JobQueue<T> {
    /// Sender for submitting jobs
    sender: Sender<Job<T>>,

    /// Receiver workers pull from
    receiver: Receiver<Job<T>>,

    /// Capacity, `None` for unbounded
    capacity: Option<usize>,

    /// Queue statistics
    stats: Arc<QueueStats>,
}

impl<T> JobQueue<T> {
    /// Create an unbounded job queue (the canonical configuration)
    pub fn unbounded() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            capacity: None,
            stats: Arc::new(QueueStats::default()),
        }
    }

    /// Create a job queue with the specified capacity
    ///
    /// Sends block while the queue is full.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity: Some(capacity),
            stats: Arc::new(QueueStats::default()),
        }
    }

    /// Get a sender for this queue
    pub fn sender(&self) -> JobSender<T> {
        JobSender {
            sender: self.sender.clone(),
            stats: Arc::clone(&self.stats),
        }
    }

    /// Get a receiver for this queue (clone for each worker)
    pub fn receiver(&self) -> JobReceiver<T> {
        JobReceiver {
            receiver: self.receiver.clone(),
            stats: Arc::clone(&self.stats),
        }
    }

    /// Get queue statistics
    pub fn stats(&self) -> Arc<QueueStats> {
        Arc::clone(&self.stats)
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Get current queue length
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Get queue capacity, `None` for unbounded
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

/// Handle for submitting jobs to the queue
pub struct JobSender<T> {
    sender: Sender<Job<T>>,
    stats: Arc<QueueStats>,
}

impl<T> Clone for JobSender<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<T> JobSender<T> {
    /// Send a job, blocking while a bounded queue is full
    ///
    /// Returns `Err` if the queue is disconnected.
    pub fn send(&self, job: Job<T>) -> Result<(), ()> {
        self.sender.send(job).map_err(|_| ())?;
        self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Handle for pulling jobs from the queue
pub struct JobReceiver<T> {
    receiver: Receiver<Job<T>>,
    stats: Arc<QueueStats>,
}

impl<T> Clone for JobReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            receiver: self.receiver.clone(),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<T> JobReceiver<T> {
    /// Receive a job, blocking until one is available
    ///
    /// Each job is delivered to exactly one receiver. Returns `None` when
    /// the queue is disconnected (all senders dropped).
    pub fn recv(&self) -> Option<Job<T>> {
        match self.receiver.recv() {
            Ok(job) => {
                self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
                Some(job)
            }
            Err(_) => None,
        }
    }

    /// Try to receive a job without blocking
    pub fn try_recv(&self) -> Option<Job<T>> {
        match self.receiver.try_recv() {
            Ok(job) => {
                self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
                Some(job)
            }
            Err(_) => None,
        }
    }
}

/// Outbound queue carrying worker outputs and completion signals
pub struct ResultQueue<R> {
    /// Sender workers push to
    sender: Sender<Delivery<R>>,

    /// Receiver the coordinator drains
    receiver: Receiver<Delivery<R>>,

    /// Queue statistics
    stats: Arc<QueueStats>,
}

impl<R> ResultQueue<R> {
    /// Create an unbounded result queue
    pub fn unbounded() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            stats: Arc::new(QueueStats::default()),
        }
    }

    /// Get a sender handle (clone for each worker)
    pub fn sender(&self) -> ResultSender<R> {
        ResultSender {
            sender: self.sender.clone(),
            stats: Arc::clone(&self.stats),
        }
    }

    /// Get the receiver handle for the draining side
    pub fn receiver(&self) -> ResultReceiver<R> {
        ResultReceiver {
            receiver: self.receiver.clone(),
            stats: Arc::clone(&self.stats),
        }
    }

    /// Get queue statistics
    pub fn stats(&self) -> Arc<QueueStats> {
        Arc::clone(&self.stats)
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Get current queue length
    pub fn len(&self) -> usize {
        self.receiver.len()
    }
}

/// Handle for sending deliveries to the result queue
pub struct ResultSender<R> {
    sender: Sender<Delivery<R>>,
    stats: Arc<QueueStats>,
}

impl<R> Clone for ResultSender<R> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<R> ResultSender<R> {
    /// Send a delivery
    ///
    /// Returns `Err` if the queue is disconnected.
    pub fn send(&self, delivery: Delivery<R>) -> Result<(), ()> {
        self.sender.send(delivery).map_err(|_| ())?;
        self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Handle for draining deliveries from the result queue
pub struct ResultReceiver<R> {
    receiver: Receiver<Delivery<R>>,
    stats: Arc<QueueStats>,
}

impl<R> Clone for ResultReceiver<R> {
    fn clone(&self) -> Self {
        Self {
            receiver: self.receiver.clone(),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<R> ResultReceiver<R> {
    /// Receive a delivery, blocking until one is available
    ///
    /// Returns `None` when the queue is disconnected.
    pub fn recv(&self) -> Option<Delivery<R>> {
        match self.receiver.recv() {
            Ok(delivery) => {
                self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
                Some(delivery)
            }
            Err(_) => None,
        }
    }

    /// Receive with a timeout
    ///
    /// Distinguishes a silent queue from a disconnected one so the caller
    /// can surface worker loss instead of hanging.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Delivery<R>, RecvTimeoutError> {
        let delivery = self.receiver.recv_timeout(timeout)?;
        self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
        Ok(delivery)
    }
}

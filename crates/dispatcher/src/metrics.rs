//! Publisher metrics for observability

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Metrics for a single publisher
#[derive(Debug, Default)]
pub struct PublisherMetrics {
    /// Messages waiting for the socket task
    queue_len: AtomicUsize,
    /// Messages accepted into the queue
    enqueued_count: AtomicU64,
    /// Messages written to the socket
    sent_count: AtomicU64,
    /// Socket send failures
    failure_count: AtomicU64,
    /// Messages dropped because the queue was full or closed
    dropped_count: AtomicU64,
}

impl PublisherMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current queue length
    pub fn queue_len(&self) -> usize {
        self.queue_len.load(Ordering::Relaxed)
    }

    /// Set current queue length
    pub fn set_queue_len(&self, len: usize) {
        self.queue_len.store(len, Ordering::Relaxed);
    }

    pub fn enqueued_count(&self) -> u64 {
        self.enqueued_count.load(Ordering::Relaxed)
    }

    pub fn inc_enqueued_count(&self) {
        self.enqueued_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn sent_count(&self) -> u64 {
        self.sent_count.load(Ordering::Relaxed)
    }

    pub fn inc_sent_count(&self) {
        self.sent_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    pub fn inc_dropped_count(&self) {
        self.dropped_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> PublisherMetricsSnapshot {
        PublisherMetricsSnapshot {
            queue_len: self.queue_len(),
            enqueued_count: self.enqueued_count(),
            sent_count: self.sent_count(),
            failure_count: self.failure_count(),
            dropped_count: self.dropped_count(),
        }
    }
}

/// Snapshot of publisher metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublisherMetricsSnapshot {
    pub queue_len: usize,
    pub enqueued_count: u64,
    pub sent_count: u64,
    pub failure_count: u64,
    pub dropped_count: u64,
}

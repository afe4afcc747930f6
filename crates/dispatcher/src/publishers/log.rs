//! LogPublisher - logs message sizes via tracing

use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use contracts::FramePublisher;
use tracing::info;

/// Publisher that only logs message sizes, for running without subscribers
pub struct LogPublisher {
    name: String,
    count: AtomicU64,
}

impl LogPublisher {
    /// Create a new LogPublisher with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: AtomicU64::new(0),
        }
    }

    /// Messages seen so far
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

impl FramePublisher for LogPublisher {
    fn name(&self) -> &str {
        &self.name
    }

    fn publish(&self, message: Bytes) {
        let seq = self.count.fetch_add(1, Ordering::Relaxed);
        info!(
            publisher = %self.name,
            seq,
            bytes = message.len(),
            "PointFrame published"
        );
    }
}

//! MemoryPublisher - keeps every message in memory

use std::sync::{Mutex, PoisonError};

use bytes::Bytes;
use contracts::FramePublisher;

/// Publisher that records messages instead of sending them
#[derive(Debug, Default)]
pub struct MemoryPublisher {
    messages: Mutex<Vec<Bytes>>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all recorded messages, in publish order
    pub fn messages(&self) -> Vec<Bytes> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return all recorded messages
    pub fn take(&self) -> Vec<Bytes> {
        std::mem::take(&mut *self.messages.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FramePublisher for MemoryPublisher {
    fn name(&self) -> &str {
        "memory"
    }

    fn publish(&self, message: Bytes) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let publisher = MemoryPublisher::new();
        publisher.publish(Bytes::from_static(b"a"));
        publisher.publish(Bytes::from_static(b"b"));

        assert_eq!(publisher.len(), 2);
        assert_eq!(publisher.messages(), vec![Bytes::from_static(b"a"), Bytes::from_static(b"b")]);

        let taken = publisher.take();
        assert_eq!(taken.len(), 2);
        assert!(publisher.is_empty());
    }
}

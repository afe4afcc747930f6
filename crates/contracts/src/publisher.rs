//! FramePublisher trait - Publish channel interface

use bytes::Bytes;

/// Fire-and-forget message output
///
/// `publish` hands one encoded frame to the transport and returns at once.
/// It never blocks on subscribers and never fails towards the caller; a
/// message that cannot be queued is dropped by the implementation.
pub trait FramePublisher: Send + Sync {
    /// Publisher name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Broadcast one message to current subscribers
    fn publish(&self, message: Bytes);
}

//! Publisher implementations
//!
//! Contains ZmqPublisher, LogPublisher, and MemoryPublisher.

mod log;
mod memory;
mod zmq;

pub use self::log::LogPublisher;
pub use self::memory::MemoryPublisher;
pub use self::zmq::{ZmqPublisher, ZmqPublisherConfig};

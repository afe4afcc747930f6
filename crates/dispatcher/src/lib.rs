//! # Dispatcher
//!
//! Publish Channel 模块。
//!
//! 负责：
//! - 绑定 ZeroMQ PUB 端点
//! - 将编码后的帧广播给当前订阅者 (fire-and-forget)
//! - 队列满时丢弃，不阻塞驱动线程

pub mod error;
pub mod metrics;
pub mod publishers;

pub use contracts::FramePublisher;
pub use error::{DispatcherError, Result};
pub use metrics::{PublisherMetrics, PublisherMetricsSnapshot};
pub use publishers::{LogPublisher, MemoryPublisher, ZmqPublisher, ZmqPublisherConfig};

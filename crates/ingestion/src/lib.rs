//! # Ingestion
//!
//! 点云数据路径：驱动事件 -> 点记录 -> protobuf 消息 -> 发布通道。
//!
//! Responsibilities:
//! - Point Converter: 原始采样 -> `PointFrame`
//! - Frame Serializer: `PointFrame` <-> protobuf 字节
//! - Device Event Bridge: 处理设备握手与点云事件
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::DeviceEventBridge;
//!
//! let bridge = Arc::new(DeviceEventBridge::new(publisher, driver.control()));
//! driver.set_event_sink(bridge.clone());
//! driver.start()?;
//! ```

mod bridge;
mod converter;
mod error;
mod metrics;
mod serializer;

// Re-exports
pub use bridge::{ActiveDevice, DeviceEventBridge, SUPPORTED_ENCODING};
pub use converter::convert_points;
pub use error::{IngestionError, Result};
pub use metrics::{BridgeMetrics, BridgeMetricsSnapshot};
pub use serializer::{decode_frame, encode_frame};

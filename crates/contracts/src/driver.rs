//! Sensor driver capability traits
//!
//! Decouples the event bridge from a concrete vendor SDK. The real SDK binding
//! and the mock driver implement the same interfaces.

use std::path::Path;
use std::sync::Arc;

use crate::{ContractError, DeviceHandle, DeviceInfo, PointCloudPacket, PointEncoding};

/// Receiver of driver events
///
/// Called from driver-owned threads, possibly concurrently. Implementations
/// must never panic or block for long: the driver reuses packet buffers as
/// soon as `on_point_cloud` returns.
pub trait EventSink: Send + Sync {
    /// Device announced itself or changed state
    fn on_device_info(&self, handle: DeviceHandle, info: &DeviceInfo);

    /// A point-cloud packet arrived
    ///
    /// `packet` is None when the driver delivered a null packet.
    fn on_point_cloud(
        &self,
        handle: DeviceHandle,
        dev_type: u8,
        packet: Option<&PointCloudPacket<'_>>,
    );
}

/// Per-device commands issued back to the driver
pub trait DeviceControl: Send + Sync {
    /// Select the point-cloud encoding a device should stream
    fn set_point_encoding(
        &self,
        handle: DeviceHandle,
        encoding: PointEncoding,
    ) -> Result<(), ContractError>;
}

/// Sensor driver lifecycle
///
/// # Example
///
/// ```ignore
/// driver.init(Path::new("config.json"))?;
/// driver.set_event_sink(bridge);
/// driver.start()?;
/// // ... events flow ...
/// driver.uninit();
/// ```
pub trait LidarDriver: Send + Sync {
    /// Driver name (used for logging)
    fn name(&self) -> &str;

    /// Initialize the SDK from a driver-owned configuration file
    fn init(&self, config_path: &Path) -> Result<(), ContractError>;

    /// Register the receiver for info and point-cloud events
    ///
    /// Replaces any previously registered sink.
    fn set_event_sink(&self, sink: Arc<dyn EventSink>);

    /// Start delivering events
    fn start(&self) -> Result<(), ContractError>;

    /// Command handle for device configuration
    fn control(&self) -> Arc<dyn DeviceControl>;

    /// Stop delivering events and release the SDK
    ///
    /// Idempotent. After return no sink method is invoked any more.
    fn uninit(&self);
}

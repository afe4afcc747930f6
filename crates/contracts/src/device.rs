//! Device identity reported by the driver

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque per-device identifier assigned by the driver at discovery time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceHandle(pub u32);

impl DeviceHandle {
    /// Raw driver value
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl From<u32> for DeviceHandle {
    #[inline]
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata announced by a device on handshake / state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Vendor device type code
    pub dev_type: u8,

    /// Serial number
    pub serial: String,

    /// Device IP address as reported by the driver
    pub lidar_ip: String,
}

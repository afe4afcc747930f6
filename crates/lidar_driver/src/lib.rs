//! # LiDAR Driver
//!
//! Device driver implementations behind `contracts::LidarDriver`.
//!
//! Responsibilities:
//! - Deliver device-info and point-cloud events to an `EventSink`
//! - Accept device commands through `DeviceControl`
//! - Provide a Mock driver for running without hardware
//!
//! ## Feature Flags
//!
//! - `livox-sdk`: Enable the Livox SDK2 driver (links the vendor C library)

pub mod error;
pub mod mock_driver;

#[cfg(feature = "livox-sdk")]
pub mod livox;

pub use contracts::{DeviceControl, EventSink, LidarDriver};
pub use error::{DriverError, Result};
pub use mock_driver::{MockDeviceControl, MockDriverConfig, MockLidarDriver};

#[cfg(feature = "livox-sdk")]
pub use livox::{LivoxDeviceControl, LivoxDriver};

//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Data Path
//! - Driver threads deliver `PointCloudPacket` views through an `EventSink`
//! - The sink converts the borrowed samples into an owned `PointFrame`
//! - The frame is encoded once and handed to a `FramePublisher`

mod blueprint;
mod device;
mod driver;
mod error;
mod frame;
mod packet;
mod point;
mod publisher;

pub use blueprint::*;
pub use device::{DeviceHandle, DeviceInfo};
pub use driver::{DeviceControl, EventSink, LidarDriver};
pub use error::*;
pub use frame::{Point, PointFrame};
pub use packet::PointCloudPacket;
pub use point::{PointEncoding, RawPointSample};
pub use publisher::FramePublisher;

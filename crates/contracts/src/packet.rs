//! PointCloudPacket - borrowed driver packet view
//!
//! The payload belongs to the driver and is only valid for the duration of
//! the callback that hands it out. Nothing here may outlive that call.

use crate::{PointEncoding, RawPointSample};

/// One driver-delivered point-cloud packet
#[derive(Debug, Clone, Copy)]
pub struct PointCloudPacket<'a> {
    /// Declared number of samples
    pub dot_num: u16,

    /// Declared packet length in bytes
    pub length: u16,

    /// Declared encoding tag (`data_type` byte)
    pub data_type: u8,

    /// Raw sample payload
    pub payload: &'a [u8],
}

impl<'a> PointCloudPacket<'a> {
    /// Create a packet view
    pub fn new(dot_num: u16, length: u16, data_type: u8, payload: &'a [u8]) -> Self {
        Self {
            dot_num,
            length,
            data_type,
            payload,
        }
    }

    /// Decoded encoding tag, None for tags outside the known set
    pub fn encoding(&self) -> Option<PointEncoding> {
        PointEncoding::from_tag(self.data_type)
    }

    /// Bytes the declared sample count occupies
    pub fn declared_payload_len(&self) -> usize {
        self.dot_num as usize * RawPointSample::STRIDE
    }

    /// View the payload as `dot_num` Cartesian samples
    ///
    /// Returns None when the payload is shorter than the declared count.
    /// Trailing bytes past the declared count are ignored.
    pub fn cartesian_samples(&self) -> Option<&'a [RawPointSample]> {
        let len = self.declared_payload_len();
        let bytes = self.payload.get(..len)?;
        // RawPointSample is packed (align 1), so any byte slice of the right length casts
        bytemuck::try_cast_slice(bytes).ok()
    }
}

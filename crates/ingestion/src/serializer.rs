//! Frame Serializer
//!
//! PointFrame <-> protobuf 字节。编码确定且不会失败；空帧编码为零长度缓冲区。

use bytes::Bytes;
use contracts::PointFrame;
use prost::Message;

use crate::error::{IngestionError, Result};

/// 编码一帧为不可变消息
#[inline]
pub fn encode_frame(frame: &PointFrame) -> Bytes {
    Bytes::from(frame.encode_to_vec())
}

/// 解码一条消息 (订阅端 / 测试)
pub fn decode_frame(message: &[u8]) -> Result<PointFrame> {
    PointFrame::decode(message).map_err(IngestionError::from)
}

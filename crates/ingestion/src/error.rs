//! Ingestion 错误类型

use thiserror::Error;

/// Ingestion 错误
///
/// 事件处理路径从不返回错误 (在桥接层内吸收)；仅解码端使用。
#[derive(Debug, Error)]
pub enum IngestionError {
    /// 消息不是合法的 PointFrame 编码
    #[error("failed to decode point frame: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// Ingestion Result 类型别名
pub type Result<T> = std::result::Result<T, IngestionError>;

//! 原始点云采样与编码类型

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 笛卡尔高精度原始点 (毫米)
///
/// 与驱动缓冲区逐字节对应 (packed, 14 字节)：x/y/z 之后紧跟反射率与回波标记。
/// 转换时只读取 x/y/z。
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawPointSample {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub reflectivity: u8,
    pub tag: u8,
}

impl RawPointSample {
    /// 单点字节数
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    /// 仅以坐标构造 (反射率与标记置零)
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self {
            x,
            y,
            z,
            reflectivity: 0,
            tag: 0,
        }
    }
}

/// 点云数据编码标记
///
/// 数值与驱动包头中的 `data_type` 字节一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PointEncoding {
    /// IMU 数据 (非点云)
    Imu = 0x00,
    /// 笛卡尔坐标，32 位毫米
    CartesianHigh = 0x01,
    /// 笛卡尔坐标，16 位厘米
    CartesianLow = 0x02,
    /// 球坐标
    Spherical = 0x03,
}

impl PointEncoding {
    /// 由包头标记解析，未知值返回 None
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x00 => Some(Self::Imu),
            0x01 => Some(Self::CartesianHigh),
            0x02 => Some(Self::CartesianLow),
            0x03 => Some(Self::Spherical),
            _ => None,
        }
    }

    /// 包头标记值
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// 该编码下单个采样的字节数
    pub fn sample_stride(self) -> usize {
        match self {
            Self::Imu => 24,
            Self::CartesianHigh => RawPointSample::STRIDE,
            Self::CartesianLow => 8,
            Self::Spherical => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_stride_is_packed() {
        assert_eq!(RawPointSample::STRIDE, 14);
    }

    #[test]
    fn test_encoding_tag_round_trip() {
        for encoding in [
            PointEncoding::Imu,
            PointEncoding::CartesianHigh,
            PointEncoding::CartesianLow,
            PointEncoding::Spherical,
        ] {
            assert_eq!(PointEncoding::from_tag(encoding.tag()), Some(encoding));
        }
        assert_eq!(PointEncoding::from_tag(0x7f), None);
    }

    #[test]
    fn test_encoding_serde_names() {
        let json = serde_json::to_string(&PointEncoding::CartesianHigh).unwrap();
        assert_eq!(json, "\"cartesian_high\"");
    }
}

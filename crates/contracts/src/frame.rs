//! PointFrame - 线上消息结构
//!
//! Protobuf 编码，字段编号与 `proto/point_frame.proto` 一致，订阅端可独立解码。
//! 无消息头、无序号、无时间戳。

/// 单个点 (毫米)
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct Point {
    #[prost(int32, tag = "1")]
    pub x: i32,
    #[prost(int32, tag = "2")]
    pub y: i32,
    #[prost(int32, tag = "3")]
    pub z: i32,
}

impl Point {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// 一帧点云：有序点列表
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct PointFrame {
    #[prost(message, repeated, tag = "1")]
    pub points: Vec<Point>,
}

impl PointFrame {
    /// 预分配容量的空帧
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// 点数量
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 是否为空帧
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<Point> for PointFrame {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

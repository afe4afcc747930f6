//! Point Converter
//!
//! 驱动缓冲区中的原始采样 -> 线上点记录。逐点按值复制 x/y/z，
//! 不做单位换算、变换或过滤。

use contracts::{Point, PointFrame, RawPointSample};

/// 转换一批原始采样
///
/// 输出点数与输入相同且顺序一致，空输入得到空帧。
#[inline]
pub fn convert_points(samples: &[RawPointSample]) -> PointFrame {
    // packed 字段只能按值读取
    samples
        .iter()
        .map(|sample| {
            let sample = *sample;
            Point::new(sample.x, sample.y, sample.z)
        })
        .collect()
}

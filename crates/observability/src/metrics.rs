//! 发布管线指标
//!
//! 基于 `metrics` facade 记录。未安装 recorder 时所有调用均为空操作。

use metrics::{counter, histogram};

/// 丢弃原因: 空包
pub const DROP_REASON_NULL_PACKET: &str = "null_packet";
/// 丢弃原因: 编码未配置或不匹配
pub const DROP_REASON_ENCODING: &str = "encoding_mismatch";
/// 丢弃原因: 载荷短于声明点数
pub const DROP_REASON_TRUNCATED: &str = "truncated";

/// 记录驱动投递的点云包 (单设备，不按句柄区分)
pub fn record_packet_received() {
    counter!("lidarpub_packets_received_total").increment(1);
}

/// 记录被桥接层丢弃的点云包
pub fn record_packet_dropped(reason: &'static str) {
    counter!("lidarpub_packets_dropped_total", "reason" => reason).increment(1);
}

/// 记录已交给发布通道的帧及其点数
pub fn record_frame_published(points: usize) {
    counter!("lidarpub_frames_published_total").increment(1);
    histogram!("lidarpub_frame_points").record(points as f64);
}

/// 记录发布队列已满而被丢弃的消息
pub fn record_publish_dropped(publisher: &str) {
    counter!(
        "lidarpub_publish_dropped_total",
        "publisher" => publisher.to_string()
    )
    .increment(1);
}

/// 记录设备信息事件
pub fn record_device_info(dev_type: u8) {
    counter!(
        "lidarpub_device_info_total",
        "dev_type" => dev_type.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_packet_received();
        record_packet_dropped(DROP_REASON_ENCODING);
        record_frame_published(3);
        record_publish_dropped("zmq");
        record_device_info(9);
    }
}

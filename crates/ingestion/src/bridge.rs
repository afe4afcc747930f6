//! Device Event Bridge
//!
//! 驱动事件 -> 设备配置 / 点云发布管线。
//!
//! 两个回调都在驱动线程上被调用，可能并发。点云事件在回调返回前同步完成
//! Converter -> Serializer -> Publisher；任何异常情况只记录日志与计数，
//! 不向驱动传播。

use std::sync::{Arc, PoisonError, RwLock};

use contracts::{
    DeviceControl, DeviceHandle, DeviceInfo, EventSink, FramePublisher, PointCloudPacket,
    PointEncoding,
};
use observability::metrics::{
    DROP_REASON_ENCODING, DROP_REASON_NULL_PACKET, DROP_REASON_TRUNCATED,
};
use tracing::{debug, info, trace, warn};

use crate::converter::convert_points;
use crate::metrics::BridgeMetrics;
use crate::serializer::encode_frame;

/// 唯一支持的点云编码
pub const SUPPORTED_ENCODING: PointEncoding = PointEncoding::CartesianHigh;

/// 最近一次握手的设备及为其选定的编码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveDevice {
    pub handle: DeviceHandle,
    pub encoding: PointEncoding,
}

/// 设备事件桥
///
/// 持有当前设备状态 (只覆盖、不清除)，由 `Arc` 在驱动与控制器之间共享。
pub struct DeviceEventBridge {
    publisher: Arc<dyn FramePublisher>,
    control: Arc<dyn DeviceControl>,
    active: RwLock<Option<ActiveDevice>>,
    metrics: Arc<BridgeMetrics>,
}

impl DeviceEventBridge {
    /// 创建桥接器
    ///
    /// `control` 用于在握手时下发编码配置。
    pub fn new(publisher: Arc<dyn FramePublisher>, control: Arc<dyn DeviceControl>) -> Self {
        Self {
            publisher,
            control,
            active: RwLock::new(None),
            metrics: Arc::new(BridgeMetrics::new()),
        }
    }

    /// 当前设备 (尚未握手时为 None)
    pub fn active_device(&self) -> Option<ActiveDevice> {
        *self.active.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// 当前设备句柄
    pub fn current_handle(&self) -> Option<DeviceHandle> {
        self.active_device().map(|device| device.handle)
    }

    /// 计数器
    pub fn metrics(&self) -> Arc<BridgeMetrics> {
        self.metrics.clone()
    }
}

impl EventSink for DeviceEventBridge {
    fn on_device_info(&self, handle: DeviceHandle, info: &DeviceInfo) {
        self.metrics.record_device_info();
        observability::record_device_info(info.dev_type);

        info!(
            handle = %handle,
            dev_type = info.dev_type,
            serial = %info.serial,
            lidar_ip = %info.lidar_ip,
            "lidar device info"
        );

        // 先记录再下发命令，新编码的首包不会因竞争被丢弃
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = Some(ActiveDevice {
            handle,
            encoding: SUPPORTED_ENCODING,
        });

        match self.control.set_point_encoding(handle, SUPPORTED_ENCODING) {
            Ok(()) => {
                debug!(handle = %handle, encoding = ?SUPPORTED_ENCODING, "point encoding requested")
            }
            Err(e) => warn!(handle = %handle, error = %e, "failed to set point encoding"),
        }
    }

    fn on_point_cloud(
        &self,
        handle: DeviceHandle,
        dev_type: u8,
        packet: Option<&PointCloudPacket<'_>>,
    ) {
        self.metrics.record_received();
        observability::record_packet_received();

        let Some(packet) = packet else {
            self.metrics.record_null_packet();
            observability::record_packet_dropped(DROP_REASON_NULL_PACKET);
            trace!(handle = %handle, "null point cloud packet ignored");
            return;
        };

        let configured = self.active_device().map(|device| device.encoding);
        if configured.map(PointEncoding::tag) != Some(packet.data_type) {
            self.metrics.record_encoding_mismatch();
            observability::record_packet_dropped(DROP_REASON_ENCODING);
            warn!(
                handle = %handle,
                dev_type,
                data_type = packet.data_type,
                configured = ?configured,
                "unsupported point encoding, packet dropped"
            );
            return;
        }

        let Some(samples) = packet.cartesian_samples() else {
            self.metrics.record_truncated();
            observability::record_packet_dropped(DROP_REASON_TRUNCATED);
            warn!(
                handle = %handle,
                dot_num = packet.dot_num,
                payload_len = packet.payload.len(),
                expected = packet.declared_payload_len(),
                "truncated point cloud payload, packet dropped"
            );
            return;
        };

        let frame = convert_points(samples);
        let points = frame.len();
        self.publisher.publish(encode_frame(&frame));

        self.metrics.record_published(points);
        observability::record_frame_published(points);
        trace!(handle = %handle, points, publisher = self.publisher.name(), "frame published");
    }
}

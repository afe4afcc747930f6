//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 线上格式快照测试
//! - 桥接层端到端场景 (握手、丢包、并发)
//! - Mock 驱动 -> 发布端全链路 (内存 / ZeroMQ)

#[cfg(test)]
mod contract_tests {
    use contracts::{Point, PointFrame};
    use ingestion::encode_frame;

    const PROTO: &str = include_str!("../../contracts/proto/point_frame.proto");

    #[test]
    fn test_proto_schema_matches_message() {
        assert!(PROTO.contains("repeated Point points = 1;"));
        assert!(PROTO.contains("int32 x = 1;"));
        assert!(PROTO.contains("int32 y = 2;"));
        assert!(PROTO.contains("int32 z = 3;"));
    }

    #[test]
    fn test_wire_snapshot() {
        let frame: PointFrame = [Point::new(1, -1, 300)].into_iter().collect();
        // x=1, y=-1 (sign-extended varint), z=300
        let expected: &[u8] = &[
            0x0a, 0x10, 0x08, 0x01, 0x10, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0x01, 0x18, 0xac, 0x02,
        ];
        assert_eq!(&encode_frame(&frame)[..], expected);
    }
}

#[cfg(test)]
mod bridge_e2e_tests {
    use std::sync::Arc;
    use std::thread;

    use contracts::{
        DeviceHandle, DeviceInfo, EventSink, Point, PointCloudPacket, PointEncoding,
        RawPointSample,
    };
    use dispatcher::MemoryPublisher;
    use ingestion::{decode_frame, DeviceEventBridge};
    use lidar_driver::MockDeviceControl;

    fn setup() -> (Arc<DeviceEventBridge>, Arc<MemoryPublisher>, Arc<MockDeviceControl>) {
        let publisher = Arc::new(MemoryPublisher::new());
        let control = Arc::new(MockDeviceControl::default());
        let bridge = Arc::new(DeviceEventBridge::new(publisher.clone(), control.clone()));
        (bridge, publisher, control)
    }

    fn info() -> DeviceInfo {
        DeviceInfo {
            dev_type: 9,
            serial: "0TFDFG700601881".to_string(),
            lidar_ip: "192.168.1.186".to_string(),
        }
    }

    fn deliver(bridge: &DeviceEventBridge, handle: u32, data_type: u8, triples: &[(i32, i32, i32)]) {
        let samples: Vec<RawPointSample> = triples
            .iter()
            .map(|&(x, y, z)| RawPointSample::new(x, y, z))
            .collect();
        let payload: &[u8] = bytemuck::cast_slice(&samples);
        let packet = PointCloudPacket::new(
            samples.len() as u16,
            (36 + payload.len()) as u16,
            data_type,
            payload,
        );
        bridge.on_point_cloud(DeviceHandle(handle), 9, Some(&packet));
    }

    /// 握手后一个 3 点包 -> 恰好一条消息，解码得到原顺序的三个点
    #[test]
    fn test_e2e_info_then_packet() {
        let (bridge, publisher, control) = setup();

        bridge.on_device_info(DeviceHandle(7), &info());
        assert_eq!(
            control.encoding_for(DeviceHandle(7)),
            Some(PointEncoding::CartesianHigh)
        );

        deliver(&bridge, 7, PointEncoding::CartesianHigh.tag(), &[(1, 2, 3), (4, 5, 6), (7, 8, 9)]);

        let messages = publisher.messages();
        assert_eq!(messages.len(), 1);
        let frame = decode_frame(&messages[0]).unwrap();
        assert_eq!(
            frame.points,
            vec![Point::new(1, 2, 3), Point::new(4, 5, 6), Point::new(7, 8, 9)]
        );
    }

    #[test]
    fn test_e2e_packet_before_info_dropped() {
        let (bridge, publisher, _) = setup();

        for tag in [0x00, 0x01, 0x02, 0x03] {
            deliver(&bridge, 7, tag, &[(1, 2, 3)]);
        }

        assert!(publisher.is_empty());
        assert_eq!(bridge.current_handle(), None);
    }

    #[test]
    fn test_e2e_mismatch_keeps_handle() {
        let (bridge, publisher, _) = setup();
        bridge.on_device_info(DeviceHandle(7), &info());

        deliver(&bridge, 7, PointEncoding::CartesianLow.tag(), &[(1, 2, 3)]);
        bridge.on_point_cloud(DeviceHandle(7), 9, None);

        assert!(publisher.is_empty());
        assert_eq!(bridge.current_handle(), Some(DeviceHandle(7)));
    }

    #[test]
    fn test_e2e_concurrent_driver_threads() {
        let (bridge, publisher, _) = setup();
        bridge.on_device_info(DeviceHandle(7), &info());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let bridge = bridge.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        deliver(&bridge, 7, 0x01, &[(t, i, t * 100 + i)]);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut points: Vec<Point> = publisher
            .messages()
            .iter()
            .map(|m| {
                let frame = decode_frame(m).unwrap();
                assert_eq!(frame.len(), 1);
                frame.points[0]
            })
            .collect();
        assert_eq!(points.len(), 100);

        points.sort_by_key(|p| p.z);
        let expected: Vec<Point> = (0..4)
            .flat_map(|t| (0..25).map(move |i| Point::new(t, i, t * 100 + i)))
            .collect();
        assert_eq!(points, expected);
    }
}

#[cfg(test)]
mod pipeline_e2e_tests {
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;

    use config_loader::ConfigLoader;
    use contracts::{DriverKind, FramePublisher, LidarDriver};
    use dispatcher::{MemoryPublisher, ZmqPublisher, ZmqPublisherConfig};
    use ingestion::{decode_frame, DeviceEventBridge};
    use lidar_driver::{MockDriverConfig, MockLidarDriver};
    use lifecycle::{LifecycleController, LifecycleState};
    use zeromq::{Socket, SocketRecv, SubSocket};

    fn mock_driver(points: u16) -> Arc<MockLidarDriver> {
        Arc::new(MockLidarDriver::new(MockDriverConfig {
            frequency_hz: 100.0,
            points_per_packet: points,
            ..Default::default()
        }))
    }

    /// Mock 驱动 -> Bridge -> MemoryPublisher，通过关闭信号结束
    #[tokio::test]
    async fn test_mock_driver_to_memory_publisher() {
        let driver = mock_driver(32);
        let publisher = Arc::new(MemoryPublisher::new());
        let bridge = Arc::new(DeviceEventBridge::new(publisher.clone(), driver.control()));

        let mut controller = LifecycleController::new(driver.clone(), "config.json");
        controller.start(bridge.clone()).unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.shutdown_signal().trigger();
        tokio::time::timeout(Duration::from_secs(2), controller.wait_for_shutdown())
            .await
            .unwrap();
        controller.teardown();
        assert_eq!(controller.state(), LifecycleState::Stopped);

        let messages = publisher.messages();
        assert!(!messages.is_empty());
        for message in &messages {
            assert_eq!(decode_frame(message).unwrap().len(), 32);
        }

        let snapshot = bridge.metrics().snapshot();
        assert_eq!(snapshot.device_infos, 1);
        assert_eq!(snapshot.frames_published, messages.len() as u64);
        assert_eq!(snapshot.dropped(), 0);

        // Teardown is final
        let count = publisher.len();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(publisher.len(), count);
    }

    /// 配置文件 -> 全链路 -> ZeroMQ 订阅端
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_config_to_zmq_subscriber() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[driver]
kind = "mock"

[publisher]
endpoint = "tcp://127.0.0.1:0"
queue_capacity = 16

[mock]
frequency_hz = 50.0
points_per_packet = 12
"#
        )
        .unwrap();

        let blueprint = ConfigLoader::load_from_path(file.path()).unwrap();
        assert_eq!(blueprint.driver.kind, DriverKind::Mock);

        let zmq = Arc::new(
            ZmqPublisher::bind(ZmqPublisherConfig::from(&blueprint.publisher))
                .await
                .unwrap(),
        );

        let mut subscriber = SubSocket::new();
        subscriber.connect(zmq.endpoint()).await.unwrap();
        subscriber.subscribe("").await.unwrap();

        let driver = Arc::new(MockLidarDriver::new(MockDriverConfig::from(&blueprint.mock)));
        let publisher: Arc<dyn FramePublisher> = zmq.clone();
        let bridge = Arc::new(DeviceEventBridge::new(publisher, driver.control()));
        let mut controller = LifecycleController::new(driver, &blueprint.driver.config_path);
        controller.start(bridge).unwrap();

        let message = tokio::time::timeout(Duration::from_secs(5), subscriber.recv())
            .await
            .expect("no frame within timeout")
            .unwrap();

        controller.shutdown_signal().trigger();
        controller.wait_for_shutdown().await;
        controller.teardown();
        zmq.close().await;

        let payload = message.get(0).unwrap();
        let frame = decode_frame(payload).unwrap();
        assert_eq!(frame.len(), 12);
        assert!(zmq.metrics().sent_count() > 0);
    }
}

//! `run` command implementation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use contracts::{DriverKind, FramePublisher, LidarDriver, PublisherBlueprint, PublisherKind};
use dispatcher::{LogPublisher, PublisherMetricsSnapshot, ZmqPublisher, ZmqPublisherConfig};
use ingestion::{BridgeMetricsSnapshot, DeviceEventBridge};
use lidar_driver::{MockDriverConfig, MockLidarDriver};
use lifecycle::LifecycleController;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::error::CliError;

/// Execute the `run` command
pub async fn run_publisher(args: &RunArgs) -> Result<()> {
    let blueprint = load_blueprint(args)?;

    info!(
        driver = ?blueprint.driver.kind,
        sdk_config = %blueprint.driver.config_path.display(),
        publisher = ?blueprint.publisher.kind,
        endpoint = %blueprint.publisher.endpoint,
        queue_capacity = blueprint.publisher.queue_capacity,
        "Configuration loaded"
    );

    // Dry run - just resolve and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let started = Instant::now();

    // Bind before the driver can deliver anything
    let zmq = match blueprint.publisher.kind {
        PublisherKind::Zmq => {
            let config = ZmqPublisherConfig::from(&blueprint.publisher);
            let publisher = ZmqPublisher::bind(config).await.with_context(|| {
                format!("Failed to bind publisher on {}", blueprint.publisher.endpoint)
            })?;
            Some(Arc::new(publisher))
        }
        PublisherKind::Log => None,
    };
    let publisher: Arc<dyn FramePublisher> = match &zmq {
        Some(zmq) => zmq.clone(),
        None => Arc::new(LogPublisher::new("log")),
    };

    let driver = build_driver(&blueprint)?;
    let bridge = Arc::new(DeviceEventBridge::new(publisher, driver.control()));
    let mut controller = LifecycleController::new(driver, &blueprint.driver.config_path);

    if let Err(e) = controller.start(bridge.clone()) {
        close_publisher(zmq.as_deref()).await;
        return Err(e).context("Failed to start driver");
    }

    let ctrl_c = controller.shutdown_signal().trigger_on_ctrl_c();
    info!("Publishing, press Ctrl-C to stop");

    controller.wait_for_shutdown().await;
    controller.teardown();
    ctrl_c.abort();

    let publisher_metrics = zmq.as_ref().map(|zmq| zmq.metrics().snapshot());
    close_publisher(zmq.as_deref()).await;

    RunSummary {
        duration: started.elapsed(),
        bridge: bridge.metrics().snapshot(),
        publisher: publisher_metrics,
    }
    .log();

    info!("lidarpub finished");
    Ok(())
}

/// Load configuration and apply CLI overrides
fn load_blueprint(args: &RunArgs) -> Result<PublisherBlueprint> {
    if let Some(path) = &args.config {
        if !path.exists() {
            return Err(CliError::config_not_found(path.display().to_string()).into());
        }
        info!(config = %path.display(), "Loading configuration");
    }

    let mut blueprint = config_loader::ConfigLoader::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(driver) = args.driver {
        blueprint.driver.kind = driver.into();
    }
    if let Some(ref sdk_config) = args.sdk_config {
        blueprint.driver.config_path = sdk_config.clone();
    }
    if let Some(publisher) = args.publisher {
        blueprint.publisher.kind = publisher.into();
    }
    if let Some(ref endpoint) = args.endpoint {
        info!(endpoint = %endpoint, "Overriding endpoint from CLI");
        blueprint.publisher.endpoint = endpoint.clone();
    }
    if let Some(queue_capacity) = args.queue_capacity {
        blueprint.publisher.queue_capacity = queue_capacity;
    }

    // Overrides go through the same rules as the file
    config_loader::validate(&blueprint).context("Invalid configuration after CLI overrides")?;
    Ok(blueprint)
}

fn build_driver(blueprint: &PublisherBlueprint) -> Result<Arc<dyn LidarDriver>> {
    match blueprint.driver.kind {
        DriverKind::Mock => {
            info!(
                frequency_hz = blueprint.mock.frequency_hz,
                points_per_packet = blueprint.mock.points_per_packet,
                "Running with MOCK driver (no hardware required)"
            );
            let config = MockDriverConfig::from(&blueprint.mock);
            Ok(Arc::new(MockLidarDriver::new(config)))
        }
        DriverKind::Livox => livox_driver(),
    }
}

#[cfg(feature = "livox-sdk")]
fn livox_driver() -> Result<Arc<dyn LidarDriver>> {
    Ok(Arc::new(lidar_driver::LivoxDriver::new()))
}

#[cfg(not(feature = "livox-sdk"))]
fn livox_driver() -> Result<Arc<dyn LidarDriver>> {
    Err(CliError::DriverUnavailable {
        driver: "livox",
        feature: "livox-sdk",
    }
    .into())
}

async fn close_publisher(zmq: Option<&ZmqPublisher>) {
    if let Some(zmq) = zmq {
        zmq.close().await;
    }
}

/// Counters reported once on exit
struct RunSummary {
    duration: Duration,
    bridge: BridgeMetricsSnapshot,
    publisher: Option<PublisherMetricsSnapshot>,
}

impl RunSummary {
    fn log(&self) {
        let publish_dropped = self.publisher.map_or(0, |p| p.dropped_count);
        let sent = self.publisher.map(|p| p.sent_count);

        info!(
            duration_secs = self.duration.as_secs_f64(),
            device_infos = self.bridge.device_infos,
            packets_received = self.bridge.packets_received,
            null_packets = self.bridge.null_packets,
            frames_published = self.bridge.frames_published,
            points_published = self.bridge.points_published,
            encoding_mismatches = self.bridge.encoding_mismatches,
            truncated_packets = self.bridge.truncated_packets,
            publish_dropped,
            messages_sent = ?sent,
            "Run summary"
        );

        if self.bridge.packets_received == 0 {
            warn!("No point cloud packets were received");
        }
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &PublisherBlueprint) {
    println!("\n=== Configuration Summary ===\n");
    println!("Driver:");
    println!("  Kind: {:?}", blueprint.driver.kind);
    println!("  SDK config: {}", blueprint.driver.config_path.display());
    println!("\nPublisher:");
    println!("  Kind: {:?}", blueprint.publisher.kind);
    println!("  Endpoint: {}", blueprint.publisher.endpoint);
    println!("  Queue capacity: {}", blueprint.publisher.queue_capacity);

    if blueprint.driver.kind == DriverKind::Mock {
        println!("\nMock:");
        println!("  Frequency: {} Hz", blueprint.mock.frequency_hz);
        println!("  Points per packet: {}", blueprint.mock.points_per_packet);
        println!("  Default encoding: {:?}", blueprint.mock.default_encoding);
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{DriverArg, PublisherArg};
    use std::io::Write;

    fn args() -> RunArgs {
        RunArgs {
            config: None,
            driver: None,
            sdk_config: None,
            publisher: None,
            endpoint: None,
            queue_capacity: None,
            metrics_port: 0,
            dry_run: false,
        }
    }

    #[test]
    fn test_defaults_without_config_file() {
        let blueprint = load_blueprint(&args()).unwrap();
        assert_eq!(blueprint.driver.kind, DriverKind::Livox);
        assert_eq!(blueprint.publisher.endpoint, "tcp://0.0.0.0:8200");
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[driver]\nkind = \"livox\"\n\n[publisher]\nendpoint = \"tcp://127.0.0.1:8200\"\nqueue_capacity = 4"
        )
        .unwrap();

        let blueprint = load_blueprint(&RunArgs {
            config: Some(file.path().to_path_buf()),
            driver: Some(DriverArg::Mock),
            publisher: Some(PublisherArg::Log),
            queue_capacity: Some(16),
            ..args()
        })
        .unwrap();

        assert_eq!(blueprint.driver.kind, DriverKind::Mock);
        assert_eq!(blueprint.publisher.kind, PublisherKind::Log);
        assert_eq!(blueprint.publisher.endpoint, "tcp://127.0.0.1:8200");
        assert_eq!(blueprint.publisher.queue_capacity, 16);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let result = load_blueprint(&RunArgs {
            endpoint: Some("udp://0.0.0.0:8200".to_string()),
            ..args()
        });
        assert!(result.is_err());

        let result = load_blueprint(&RunArgs {
            queue_capacity: Some(0),
            ..args()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_blueprint(&RunArgs {
            config: Some("does/not/exist.toml".into()),
            ..args()
        })
        .unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[cfg(not(feature = "livox-sdk"))]
    #[test]
    fn test_livox_unavailable_without_feature() {
        let blueprint = PublisherBlueprint::default();
        let err = build_driver(&blueprint).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::DriverUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_mock_run_publishes_and_stops() {
        let mut blueprint = PublisherBlueprint::default();
        blueprint.driver.kind = DriverKind::Mock;
        blueprint.mock.frequency_hz = 100.0;

        let publisher = Arc::new(dispatcher::MemoryPublisher::new());
        let driver = build_driver(&blueprint).unwrap();
        let bridge = Arc::new(DeviceEventBridge::new(publisher.clone(), driver.control()));
        let controller = LifecycleController::new(driver, &blueprint.driver.config_path);
        let signal = controller.shutdown_signal();

        let run = tokio::spawn(controller.run(bridge.clone()));
        tokio::time::sleep(Duration::from_millis(100)).await;
        signal.trigger();
        tokio::time::timeout(Duration::from_secs(2), run)
            .await
            .unwrap()
            .unwrap()
            .unwrap();

        assert!(!publisher.is_empty());
        assert_eq!(bridge.metrics().snapshot().device_infos, 1);
    }
}

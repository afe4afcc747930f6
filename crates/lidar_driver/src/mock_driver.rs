//! Mock driver implementation
//!
//! Implements `LidarDriver` trait, generates simulated device events.
//! Used for testing and development without a physical sensor.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use contracts::{
    ContractError, DeviceControl, DeviceHandle, DeviceInfo, EventSink, LidarDriver,
    MockDriverSettings, PointCloudPacket, PointEncoding, RawPointSample,
};
use tracing::{debug, trace, warn};

use crate::error::DriverError;

/// Ethernet packet header length preceding the sample payload
const PACKET_HEADER_LEN: usize = 36;

/// Simulated ring radius (mm)
const RING_RADIUS_MM: f64 = 5000.0;

/// Mock driver configuration
#[derive(Debug, Clone)]
pub struct MockDriverConfig {
    /// Packet frequency (Hz)
    pub frequency_hz: f64,
    /// Samples per packet
    pub points_per_packet: u16,
    /// Encoding streamed until the device is configured
    pub default_encoding: PointEncoding,
    /// Handle announced for the simulated device
    pub handle: DeviceHandle,
    /// Announced device metadata
    pub info: DeviceInfo,
    /// Make `init` fail (startup failure testing)
    pub fail_init: bool,
}

impl Default for MockDriverConfig {
    fn default() -> Self {
        Self::from(&MockDriverSettings::default())
    }
}

impl From<&MockDriverSettings> for MockDriverConfig {
    fn from(settings: &MockDriverSettings) -> Self {
        Self {
            frequency_hz: settings.frequency_hz,
            points_per_packet: settings.points_per_packet,
            default_encoding: settings.default_encoding,
            handle: DeviceHandle(1),
            info: DeviceInfo {
                dev_type: 9,
                serial: "MOCK0000000001".to_string(),
                lidar_ip: "192.168.1.100".to_string(),
            },
            fail_init: false,
        }
    }
}

/// Device commands received by the mock
///
/// Remembers the encoding selected per handle, the way the firmware would.
#[derive(Debug, Default)]
pub struct MockDeviceControl {
    encodings: Mutex<HashMap<DeviceHandle, PointEncoding>>,
    commands: AtomicU64,
}

impl MockDeviceControl {
    /// Encoding last selected for a device
    pub fn encoding_for(&self, handle: DeviceHandle) -> Option<PointEncoding> {
        self.encodings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&handle)
            .copied()
    }

    /// Number of configuration commands received
    pub fn command_count(&self) -> u64 {
        self.commands.load(Ordering::Relaxed)
    }
}

impl DeviceControl for MockDeviceControl {
    fn set_point_encoding(
        &self,
        handle: DeviceHandle,
        encoding: PointEncoding,
    ) -> Result<(), ContractError> {
        self.encodings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle, encoding);
        self.commands.fetch_add(1, Ordering::Relaxed);
        debug!(handle = %handle, encoding = ?encoding, "mock device encoding set");
        Ok(())
    }
}

/// Mock LiDAR driver
///
/// After `start`, a background thread announces the device once and then
/// streams point-cloud packets at the configured frequency, tagged with the
/// encoding the device was last configured with.
pub struct MockLidarDriver {
    config: MockDriverConfig,
    control: Arc<MockDeviceControl>,
    sink: Arc<RwLock<Option<Arc<dyn EventSink>>>>,
    initialized: AtomicBool,
    running: Arc<AtomicBool>,
    /// Dropped by `uninit` to wake the event thread mid-interval
    stop_tx: Mutex<Option<Sender<()>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl MockLidarDriver {
    /// Create new mock driver
    pub fn new(config: MockDriverConfig) -> Self {
        Self {
            config,
            control: Arc::new(MockDeviceControl::default()),
            sink: Arc::new(RwLock::new(None)),
            initialized: AtomicBool::new(false),
            running: Arc::new(AtomicBool::new(false)),
            stop_tx: Mutex::new(None),
            worker: Mutex::new(None),
        }
    }

    /// Concrete device control (inspection in tests)
    pub fn device_control(&self) -> Arc<MockDeviceControl> {
        self.control.clone()
    }

    /// Whether `init` succeeded and `uninit` has not run since
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Whether the event thread is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Generate one packet worth of samples on a rotating ring
    fn generate_samples(points: u16, packet_index: u64) -> Vec<RawPointSample> {
        let points = points as u64;
        let step = std::f64::consts::TAU / 3600.0;
        (0..points)
            .map(|i| {
                let angle = ((packet_index * points + i) % 3600) as f64 * step;
                let mut sample = RawPointSample::new(
                    (RING_RADIUS_MM * angle.cos()) as i32,
                    (RING_RADIUS_MM * angle.sin()) as i32,
                    (i % 32) as i32 * 10 - 150,
                );
                sample.reflectivity = (i % 256) as u8;
                sample
            })
            .collect()
    }

    fn current_sink(sink: &RwLock<Option<Arc<dyn EventSink>>>) -> Option<Arc<dyn EventSink>> {
        sink.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl LidarDriver for MockLidarDriver {
    fn name(&self) -> &str {
        "mock"
    }

    fn init(&self, config_path: &Path) -> Result<(), ContractError> {
        if self.config.fail_init {
            return Err(DriverError::config_rejected(
                self.name(),
                config_path.display().to_string(),
                "simulated init failure",
            )
            .into());
        }

        debug!(config = %config_path.display(), "mock driver initialized");
        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn set_event_sink(&self, sink: Arc<dyn EventSink>) {
        *self.sink.write().unwrap_or_else(PoisonError::into_inner) = Some(sink);
    }

    fn start(&self) -> Result<(), ContractError> {
        if !self.is_initialized() {
            return Err(DriverError::NotInitialized {
                driver: self.name().to_string(),
            }
            .into());
        }

        let interval = Duration::try_from_secs_f64(1.0 / self.config.frequency_hz).map_err(|_| {
            DriverError::InvalidFrequency {
                driver: self.name().to_string(),
                frequency_hz: self.config.frequency_hz,
            }
        })?;

        // Idempotent: if already running, don't start again
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("mock driver already running");
            return Ok(());
        }

        let config = self.config.clone();
        let control = self.control.clone();
        let sink = self.sink.clone();
        let running = self.running.clone();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("mock-lidar".to_string())
            .spawn(move || {
                debug!(
                    handle = %config.handle,
                    frequency_hz = config.frequency_hz,
                    points = config.points_per_packet,
                    "mock driver started"
                );

                if let Some(sink) = Self::current_sink(&sink) {
                    sink.on_device_info(config.handle, &config.info);
                }

                let mut packet_index: u64 = 0;
                while running.load(Ordering::Relaxed) {
                    let encoding = control
                        .encoding_for(config.handle)
                        .unwrap_or(config.default_encoding);
                    let samples = Self::generate_samples(config.points_per_packet, packet_index);
                    let payload: &[u8] = bytemuck::cast_slice(&samples);
                    let packet = PointCloudPacket::new(
                        config.points_per_packet,
                        (PACKET_HEADER_LEN + payload.len()) as u16,
                        encoding.tag(),
                        payload,
                    );

                    if let Some(sink) = Self::current_sink(&sink) {
                        sink.on_point_cloud(config.handle, config.info.dev_type, Some(&packet));
                    }

                    trace!(packet_index, encoding = ?encoding, "mock packet emitted");
                    packet_index += 1;

                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }

                debug!("mock driver stopped");
            })
            .map_err(|source| {
                self.running.store(false, Ordering::SeqCst);
                DriverError::ThreadSpawn {
                    driver: self.name().to_string(),
                    source,
                }
            })?;

        *self.stop_tx.lock().unwrap_or_else(PoisonError::into_inner) = Some(stop_tx);
        *self.worker.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
        Ok(())
    }

    fn control(&self) -> Arc<dyn DeviceControl> {
        self.control.clone()
    }

    fn uninit(&self) {
        self.running.store(false, Ordering::SeqCst);
        // Disconnects the stop channel, waking the thread out of its wait
        self.stop_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let worker = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(worker) = worker {
            // Joining from the event thread itself would deadlock
            if worker.thread().id() != thread::current().id() && worker.join().is_err() {
                warn!("mock driver thread panicked");
            }
        }

        *self.sink.write().unwrap_or_else(PoisonError::into_inner) = None;
        if self.initialized.swap(false, Ordering::SeqCst) {
            debug!("mock driver uninitialized");
        }
    }
}

impl Drop for MockLidarDriver {
    fn drop(&mut self) {
        self.uninit();
    }
}

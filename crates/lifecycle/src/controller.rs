//! Lifecycle Controller

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use contracts::{EventSink, LidarDriver};
use tracing::{error, info, instrument};

use crate::error::{LifecycleError, Result};
use crate::shutdown::ShutdownSignal;

/// Process lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Running,
    Draining,
    Stopped,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Owns driver startup and teardown around a blocking shutdown wait
///
/// The publish endpoint is bound by the caller before `start`, so the first
/// accepted frame already has somewhere to go.
pub struct LifecycleController {
    driver: Arc<dyn LidarDriver>,
    config_path: PathBuf,
    shutdown: ShutdownSignal,
    state: LifecycleState,
}

impl LifecycleController {
    /// Create a controller for `driver`, configured from `config_path`
    pub fn new(driver: Arc<dyn LidarDriver>, config_path: impl Into<PathBuf>) -> Self {
        Self {
            driver,
            config_path: config_path.into(),
            shutdown: ShutdownSignal::new(),
            state: LifecycleState::Uninitialized,
        }
    }

    /// Use an externally owned shutdown signal
    pub fn with_shutdown(mut self, shutdown: ShutdownSignal) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Handle for triggering shutdown from elsewhere
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Uninitialized -> Running
    ///
    /// Initializes the driver, registers `sink` and starts event delivery.
    /// Any failure tears the driver down and leaves the controller Stopped.
    #[instrument(name = "lifecycle_start", skip(self, sink), fields(driver = %self.driver.name()))]
    pub fn start(&mut self, sink: Arc<dyn EventSink>) -> Result<()> {
        if self.state != LifecycleState::Uninitialized {
            return Err(LifecycleError::InvalidState {
                action: "start",
                state: self.state,
            });
        }

        let driver = self.driver.name().to_string();

        if let Err(source) = self.driver.init(&self.config_path) {
            error!(
                driver = %driver,
                config = %self.config_path.display(),
                error = %source,
                "driver initialization failed"
            );
            self.abort();
            return Err(LifecycleError::DriverInit { driver, source });
        }

        self.driver.set_event_sink(sink);

        if let Err(source) = self.driver.start() {
            error!(driver = %driver, error = %source, "driver start failed");
            self.abort();
            return Err(LifecycleError::DriverStart { driver, source });
        }

        self.state = LifecycleState::Running;
        info!(driver = %driver, config = %self.config_path.display(), "driver running");
        Ok(())
    }

    /// Running -> Draining, once the shutdown signal fires
    ///
    /// Returns immediately when not Running.
    pub async fn wait_for_shutdown(&mut self) {
        if self.state != LifecycleState::Running {
            return;
        }

        self.shutdown.wait().await;
        self.state = LifecycleState::Draining;
        info!("draining");
    }

    /// -> Stopped
    ///
    /// Blocks until the driver has stopped calling the sink. In-flight events
    /// are not drained. Idempotent.
    #[instrument(name = "lifecycle_teardown", skip(self), fields(state = %self.state))]
    pub fn teardown(&mut self) {
        if self.state == LifecycleState::Stopped {
            return;
        }

        self.driver.uninit();
        self.state = LifecycleState::Stopped;
        info!(driver = %self.driver.name(), "driver stopped");
    }

    /// start, wait for shutdown, teardown
    pub async fn run(mut self, sink: Arc<dyn EventSink>) -> Result<()> {
        self.start(sink)?;
        self.wait_for_shutdown().await;
        self.teardown();
        Ok(())
    }

    fn abort(&mut self) {
        self.driver.uninit();
        self.state = LifecycleState::Stopped;
    }
}

impl Drop for LifecycleController {
    fn drop(&mut self) {
        if matches!(
            self.state,
            LifecycleState::Running | LifecycleState::Draining
        ) {
            self.teardown();
        }
    }
}

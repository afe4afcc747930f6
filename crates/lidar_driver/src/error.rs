//! Driver error types

use contracts::ContractError;
use thiserror::Error;

/// Driver specific error
#[derive(Debug, Error)]
pub enum DriverError {
    /// `start` called before a successful `init`
    #[error("driver '{driver}' is not initialized")]
    NotInitialized { driver: String },

    /// SDK rejected the configuration file
    #[error("driver '{driver}' rejected config '{path}': {message}")]
    ConfigRejected {
        driver: String,
        path: String,
        message: String,
    },

    /// Event thread could not be spawned
    #[error("failed to spawn event thread for driver '{driver}': {source}")]
    ThreadSpawn {
        driver: String,
        #[source]
        source: std::io::Error,
    },

    /// Packet interval cannot be represented
    #[error("driver '{driver}' cannot run at {frequency_hz} Hz")]
    InvalidFrequency { driver: String, frequency_hz: f64 },

    /// SDK call returned a failure status
    #[error("SDK call '{call}' failed with status {status}")]
    SdkStatus { call: &'static str, status: i32 },

    /// Wrapped ContractError
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl DriverError {
    /// Create config rejected error
    pub fn config_rejected(
        driver: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ConfigRejected {
            driver: driver.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<DriverError> for ContractError {
    fn from(err: DriverError) -> Self {
        let message = err.to_string();
        match err {
            DriverError::Contract(inner) => inner,
            DriverError::ConfigRejected { driver, .. } => {
                ContractError::driver_init(driver, message)
            }
            DriverError::NotInitialized { driver }
            | DriverError::ThreadSpawn { driver, .. }
            | DriverError::InvalidFrequency { driver, .. } => {
                ContractError::driver_start(driver, message)
            }
            DriverError::SdkStatus { .. } => ContractError::Other(message),
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, DriverError>;

//! Layered error definitions
//!
//! Categorized by source: config / driver / publish

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Driver Errors =====
    /// Driver initialization failed
    #[error("driver '{driver}' init failed: {message}")]
    DriverInit { driver: String, message: String },

    /// Driver start failed
    #[error("driver '{driver}' start failed: {message}")]
    DriverStart { driver: String, message: String },

    /// Device command rejected by the driver
    #[error("device command failed for handle {handle}: {message}")]
    DeviceCommand { handle: u32, message: String },

    // ===== Publish Errors =====
    /// Publish endpoint could not be bound
    #[error("publisher '{publisher}' bind error on '{endpoint}': {message}")]
    PublisherBind {
        publisher: String,
        endpoint: String,
        message: String,
    },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create driver init error
    pub fn driver_init(driver: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DriverInit {
            driver: driver.into(),
            message: message.into(),
        }
    }

    /// Create driver start error
    pub fn driver_start(driver: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DriverStart {
            driver: driver.into(),
            message: message.into(),
        }
    }

    /// Create device command error
    pub fn device_command(handle: u32, message: impl Into<String>) -> Self {
        Self::DeviceCommand {
            handle,
            message: message.into(),
        }
    }

    /// Create publisher bind error
    pub fn publisher_bind(
        publisher: impl Into<String>,
        endpoint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::PublisherBind {
            publisher: publisher.into(),
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}

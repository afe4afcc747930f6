//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Driver kind selected but not compiled in
    #[cfg_attr(feature = "livox-sdk", allow(dead_code))]
    #[error("Driver '{driver}' is not available in this build (enable the '{feature}' feature, or use --driver mock)")]
    DriverUnavailable {
        driver: &'static str,
        feature: &'static str,
    },
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }
}

//! Dispatcher error types

use contracts::ContractError;
use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Endpoint could not be bound
    #[error("failed to bind '{endpoint}': {message}")]
    Bind { endpoint: String, message: String },

    /// Wrapped ContractError
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl DispatcherError {
    /// Create a bind error
    pub fn bind(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Bind {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}

impl From<DispatcherError> for ContractError {
    fn from(err: DispatcherError) -> Self {
        match err {
            DispatcherError::Contract(inner) => inner,
            DispatcherError::Bind { endpoint, message } => {
                ContractError::publisher_bind("zmq", endpoint, message)
            }
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, DispatcherError>;

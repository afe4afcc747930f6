//! Lifecycle error types

use contracts::ContractError;
use thiserror::Error;

use crate::controller::LifecycleState;

/// Lifecycle errors; all of them are fatal at startup
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Driver rejected its configuration
    #[error("driver '{driver}' failed to initialize")]
    DriverInit {
        driver: String,
        #[source]
        source: ContractError,
    },

    /// Driver initialized but could not start delivering events
    #[error("driver '{driver}' failed to start")]
    DriverStart {
        driver: String,
        #[source]
        source: ContractError,
    },

    /// Operation not allowed in the current state
    #[error("cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: LifecycleState,
    },
}

/// Result alias
pub type Result<T> = std::result::Result<T, LifecycleError>;

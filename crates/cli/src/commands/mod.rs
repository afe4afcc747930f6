//! Command implementations.

mod run;
mod validate;

pub use run::run_publisher;
pub use validate::run_validate;

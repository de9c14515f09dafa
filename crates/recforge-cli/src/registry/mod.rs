mod logging;
mod run;

pub use logging::init_logging;
pub use run::{RunSummary, write_run_summary};

use thiserror::Error;

/// Errors from run logging and run summaries.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

/// Result type for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

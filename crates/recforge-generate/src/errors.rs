use recforge_core::ConfigError;
use thiserror::Error;

/// Errors emitted by record generation. Every variant ends the run.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("resource error: {0}")]
    Resource(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

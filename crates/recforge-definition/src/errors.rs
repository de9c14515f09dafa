use std::path::PathBuf;

use recforge_core::ConfigError;
use serde::Serialize;
use thiserror::Error;

/// Definition-file errors. All of them are fatal and detected before generation.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to read definition file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("line {line}: missing '=' in '{text}'")]
    MissingEquals { line: usize, text: String },
    #[error("line {line}: unknown key '{key}'")]
    UnknownKey { line: usize, key: String },
    #[error("line {line}: invalid {key} value '{value}': {reason}")]
    InvalidValue {
        line: usize,
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("missing required key {0}")]
    MissingKey(&'static str),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Non-fatal issue found while loading a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionWarning {
    pub code: &'static str,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
}

impl DefinitionWarning {
    pub fn new(code: &'static str, line: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            code,
            line,
            message: message.into(),
        }
    }
}

/// Result type for definition loading.
pub type Result<T> = std::result::Result<T, DefinitionError>;

//! Core contracts for recforge.
//!
//! This crate defines the generation config shared by the definition loader,
//! the record generator and the CLI, together with its validation rules.

pub mod config;
pub mod error;
pub mod types;
pub mod validation;

pub use config::{
    GenerationConfig, ISO2022_JP_ASCII_IN, ISO2022_JP_KANJI_IN, MAX_RDW_TOTAL,
    MAX_SHIFT_CODE_LEN, RDW_LENGTH,
};
pub use error::{ConfigError, Result};
pub use types::{DataMode, FileType, FillPolicy, Newline, RdwEndian, TextScheme, VariableNewline};
pub use validation::validate_config;

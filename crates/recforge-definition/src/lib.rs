//! Definition-file loader for recforge.
//!
//! Reads the line-oriented `KEY=VALUE` format and produces a validated
//! [`recforge_core::GenerationConfig`] plus structured warnings.

pub mod errors;
pub mod parse;

pub use errors::{DefinitionError, DefinitionWarning};
pub use parse::{LoadedDefinition, load_definition, parse_definition_bytes, parse_definition_str};

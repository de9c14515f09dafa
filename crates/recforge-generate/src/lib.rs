//! Record generation for recforge.
//!
//! Turns a validated `GenerationConfig` into a stream of fixed-length or
//! RDW-prefixed variable-length records. All randomness comes from an
//! injected source, so a seed fully determines the output bytes.

pub mod engine;
pub mod errors;
pub mod fill;
pub mod framer;
pub mod model;
pub mod output;
pub mod text;

pub use engine::GenerationEngine;
pub use errors::GenerationError;
pub use fill::ContentFiller;
pub use framer::{RecordFramer, encode_rdw, generate};
pub use model::{GenerateOptions, GenerationReport, RecordStats};
pub use text::{EncodeSummary, ShiftState, TextEncoder};

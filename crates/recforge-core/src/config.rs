use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::{DataMode, FileType, FillPolicy, Newline, RdwEndian, TextScheme, VariableNewline};

/// Size of the record descriptor word that prefixes variable records.
pub const RDW_LENGTH: usize = 4;
/// Largest total length an RDW can declare.
pub const MAX_RDW_TOTAL: usize = u16::MAX as usize;
/// Upper bound on the length of a DBCS shift code.
pub const MAX_SHIFT_CODE_LEN: usize = 8;
/// ISO-2022-JP escape selecting JIS X 0208 (`ESC $ B`).
pub const ISO2022_JP_KANJI_IN: &[u8] = &[0x1B, 0x24, 0x42];
/// ISO-2022-JP escape selecting ASCII (`ESC ( B`).
pub const ISO2022_JP_ASCII_IN: &[u8] = &[0x1B, 0x28, 0x42];

/// Validated parameters describing the shape and content of a dataset.
///
/// Built once by the definition loader and only read afterwards; run
/// [`crate::validate_config`] before handing it to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GenerationConfig {
    pub file_type: FileType,
    /// Exact size of fixed records, inclusive maximum content size of variable records.
    pub record_length: usize,
    pub data_mode: DataMode,
    /// Only consulted for fixed text files unless `variable_newline` is `include`.
    pub newline: Newline,
    pub record_count: u64,
    pub rdw_endian: RdwEndian,
    pub fill_policy: FillPolicy,
    /// Only consulted for random text fills.
    pub text_scheme: TextScheme,
    /// Marker entering a double-byte region (mixed ISO-2022 only).
    #[serde(default)]
    pub dbcs_start_code: Vec<u8>,
    /// Marker leaving a double-byte region (mixed ISO-2022 only).
    #[serde(default)]
    pub dbcs_end_code: Vec<u8>,
    #[serde(default)]
    pub variable_newline: VariableNewline,
}

impl GenerationConfig {
    /// Config with the loader defaults for every optional field.
    pub fn new(file_type: FileType, record_length: usize, record_count: u64) -> Self {
        Self {
            file_type,
            record_length,
            data_mode: DataMode::Text,
            newline: Newline::Lf,
            record_count,
            rdw_endian: RdwEndian::Big,
            fill_policy: FillPolicy::Default,
            text_scheme: TextScheme::Ascii,
            dbcs_start_code: Vec::new(),
            dbcs_end_code: Vec::new(),
            variable_newline: VariableNewline::Omit,
        }
    }

    /// Newline bytes written after a fixed record's content.
    pub fn newline_bytes(&self) -> &'static [u8] {
        match (self.file_type, self.data_mode) {
            (FileType::Fixed, DataMode::Text) => self.newline.as_bytes(),
            _ => &[],
        }
    }

    /// Newline bytes carried inside a variable record, after its content.
    pub fn variable_newline_bytes(&self) -> &'static [u8] {
        match (self.file_type, self.data_mode, self.variable_newline) {
            (FileType::Variable, DataMode::Text, VariableNewline::Include) => {
                self.newline.as_bytes()
            }
            _ => &[],
        }
    }

    /// Largest content length any record can have.
    pub fn max_content_length(&self) -> usize {
        self.record_length
    }

    /// True when the filler hands content to a multi-byte text encoder.
    pub fn uses_multibyte_text(&self) -> bool {
        self.fill_policy == FillPolicy::Random
            && self.data_mode == DataMode::Text
            && self.text_scheme != TextScheme::Ascii
    }
}

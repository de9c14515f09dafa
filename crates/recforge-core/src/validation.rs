use crate::config::{GenerationConfig, MAX_RDW_TOTAL, MAX_SHIFT_CODE_LEN, RDW_LENGTH};
use crate::error::{ConfigError, Result};
use crate::types::{FileType, TextScheme};

/// Validate the invariants a generation run relies on.
///
/// This checks:
/// - record length and record count are positive
/// - variable records always fit a 16-bit RDW length
/// - shift codes are short enough and, for mixed ISO-2022 text, paired
pub fn validate_config(config: &GenerationConfig) -> Result<()> {
    if config.record_length == 0 {
        return Err(ConfigError::NonPositive {
            field: "record_length",
        });
    }
    if config.record_count == 0 {
        return Err(ConfigError::NonPositive {
            field: "record_count",
        });
    }

    if config.file_type == FileType::Variable {
        let total = config
            .record_length
            .saturating_add(config.variable_newline_bytes().len())
            .saturating_add(RDW_LENGTH);
        if total > MAX_RDW_TOTAL {
            return Err(ConfigError::RdwOverflow {
                record_length: config.record_length,
                total,
                max: MAX_RDW_TOTAL,
            });
        }
    }

    for (field, code) in [
        ("dbcs_start_code", &config.dbcs_start_code),
        ("dbcs_end_code", &config.dbcs_end_code),
    ] {
        if code.len() > MAX_SHIFT_CODE_LEN {
            return Err(ConfigError::ShiftCodeTooLong {
                field,
                len: code.len(),
                max: MAX_SHIFT_CODE_LEN,
            });
        }
    }

    if config.text_scheme == TextScheme::MixedIso2022
        && config.dbcs_start_code.is_empty() != config.dbcs_end_code.is_empty()
    {
        return Err(ConfigError::UnpairedShiftCodes);
    }

    Ok(())
}

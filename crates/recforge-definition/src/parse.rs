use std::collections::HashMap;
use std::path::Path;

use recforge_core::{
    DataMode, FileType, FillPolicy, GenerationConfig, ISO2022_JP_ASCII_IN, ISO2022_JP_KANJI_IN,
    Newline, RdwEndian, TextScheme, VariableNewline, validate_config,
};
use tracing::{debug, warn};

use crate::errors::{DefinitionError, DefinitionWarning, Result};

/// A validated config together with the warnings collected while loading it.
#[derive(Debug, Clone)]
pub struct LoadedDefinition {
    pub config: GenerationConfig,
    pub warnings: Vec<DefinitionWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Key {
    FileType,
    RecordLength,
    DataMode,
    Newline,
    RecordCount,
    RdwEndian,
    FillPattern,
    TextType,
    DbcsStartCode,
    DbcsEndCode,
    VariableNewline,
}

impl Key {
    fn parse(raw: &str) -> Option<Self> {
        let key = match raw {
            "FILE_TYPE" => Key::FileType,
            "RECORD_LENGTH" => Key::RecordLength,
            "DATA_MODE" => Key::DataMode,
            "NEWLINE" => Key::Newline,
            "RECORD_COUNT" => Key::RecordCount,
            "RDW_ENDIAN" => Key::RdwEndian,
            "FILL_PATTERN" => Key::FillPattern,
            "TEXT_TYPE" => Key::TextType,
            "DBCS_START_CODE" => Key::DbcsStartCode,
            "DBCS_END_CODE" => Key::DbcsEndCode,
            "VARIABLE_NEWLINE" => Key::VariableNewline,
            _ => return None,
        };
        Some(key)
    }

    fn name(self) -> &'static str {
        match self {
            Key::FileType => "FILE_TYPE",
            Key::RecordLength => "RECORD_LENGTH",
            Key::DataMode => "DATA_MODE",
            Key::Newline => "NEWLINE",
            Key::RecordCount => "RECORD_COUNT",
            Key::RdwEndian => "RDW_ENDIAN",
            Key::FillPattern => "FILL_PATTERN",
            Key::TextType => "TEXT_TYPE",
            Key::DbcsStartCode => "DBCS_START_CODE",
            Key::DbcsEndCode => "DBCS_END_CODE",
            Key::VariableNewline => "VARIABLE_NEWLINE",
        }
    }
}

#[derive(Default)]
struct RawDefinition {
    file_type: Option<FileType>,
    record_length: Option<usize>,
    data_mode: Option<DataMode>,
    newline: Option<Newline>,
    record_count: Option<u64>,
    rdw_endian: Option<RdwEndian>,
    fill_policy: Option<FillPolicy>,
    text_scheme: Option<TextScheme>,
    dbcs_start_code: Option<Vec<u8>>,
    dbcs_end_code: Option<Vec<u8>>,
    variable_newline: Option<VariableNewline>,
    lines: HashMap<Key, usize>,
}

/// Read and parse a definition file.
///
/// The file is read as raw bytes so `FILL_PATTERN` may hold text in any
/// encoding.
pub fn load_definition(path: &Path) -> Result<LoadedDefinition> {
    let contents = std::fs::read(path).map_err(|source| DefinitionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "definition file read");
    parse_definition_bytes(&contents)
}

/// Parse `KEY=VALUE` definition text into a validated config.
pub fn parse_definition_str(contents: &str) -> Result<LoadedDefinition> {
    parse_definition_bytes(contents.as_bytes())
}

/// Parse definition bytes. Keys and keyword values must be ASCII; the
/// `FILL_PATTERN` value is kept byte for byte.
pub fn parse_definition_bytes(contents: &[u8]) -> Result<LoadedDefinition> {
    let mut raw = RawDefinition::default();
    let mut warnings = Vec::new();

    for (index, line) in contents.split(|byte| *byte == b'\n').enumerate() {
        let line_no = index + 1;
        let line = line.trim_ascii();
        if line.is_empty() || line.starts_with(b"#") {
            continue;
        }

        let Some(split) = line.iter().position(|byte| *byte == b'=') else {
            return Err(DefinitionError::MissingEquals {
                line: line_no,
                text: String::from_utf8_lossy(line).into_owned(),
            });
        };
        let key = line[..split].trim_ascii();
        let value = line[split + 1..].trim_ascii();
        let Some(key) = std::str::from_utf8(key).ok().and_then(Key::parse) else {
            return Err(DefinitionError::UnknownKey {
                line: line_no,
                key: String::from_utf8_lossy(key).into_owned(),
            });
        };

        if let Some(previous) = raw.lines.insert(key, line_no) {
            warnings.push(DefinitionWarning::new(
                "duplicate_key",
                Some(line_no),
                format!(
                    "{} already set on line {previous}; the later value wins",
                    key.name()
                ),
            ));
        }

        apply_entry(&mut raw, key, value, line_no, &mut warnings)?;
    }

    let config = resolve(raw, &mut warnings)?;

    for warning in &warnings {
        warn!(
            code = warning.code,
            line = warning.line,
            message = %warning.message,
            "definition warning"
        );
    }

    Ok(LoadedDefinition { config, warnings })
}

fn apply_entry(
    raw: &mut RawDefinition,
    key: Key,
    raw_value: &[u8],
    line: usize,
    warnings: &mut Vec<DefinitionWarning>,
) -> Result<()> {
    // FILL_PATTERN is the only value kept as raw bytes
    let value = match key {
        Key::FillPattern => "",
        _ => ascii_value(line, key, raw_value)?,
    };
    match key {
        Key::FileType => {
            raw.file_type = Some(match value {
                "FIXED" => FileType::Fixed,
                "VARIABLE" => FileType::Variable,
                _ => return Err(invalid_choice(line, key, value, "FIXED, VARIABLE")),
            });
        }
        Key::RecordLength => {
            raw.record_length = Some(parse_positive(line, key, value)?);
        }
        Key::DataMode => {
            raw.data_mode = Some(match value {
                "TEXT" => DataMode::Text,
                "BINARY" => DataMode::Binary,
                _ => return Err(invalid_choice(line, key, value, "TEXT, BINARY")),
            });
        }
        Key::Newline => {
            raw.newline = Some(match value {
                "LF" => Newline::Lf,
                "CRLF" => Newline::Crlf,
                "CR" => Newline::Cr,
                "NONE" => Newline::None,
                _ => return Err(invalid_choice(line, key, value, "LF, CRLF, CR, NONE")),
            });
        }
        Key::RecordCount => {
            raw.record_count = Some(parse_positive(line, key, value)?);
        }
        Key::RdwEndian => {
            raw.rdw_endian = Some(match value {
                "BIG" => RdwEndian::Big,
                "LITTLE" => RdwEndian::Little,
                _ => return Err(invalid_choice(line, key, value, "BIG, LITTLE")),
            });
        }
        Key::FillPattern => {
            raw.fill_policy = Some(parse_fill_pattern(line, raw_value)?);
        }
        Key::TextType => {
            raw.text_scheme = Some(match value {
                "ASCII" => TextScheme::Ascii,
                "SJIS" | "SHIFT_JIS" => TextScheme::ShiftJis,
                "JAPANESE" => {
                    warnings.push(DefinitionWarning::new(
                        "legacy_text_type",
                        Some(line),
                        "TEXT_TYPE=JAPANESE is read as SJIS",
                    ));
                    TextScheme::ShiftJis
                }
                "ISO_2022" | "ISO2022" | "MIXED" => TextScheme::MixedIso2022,
                _ => return Err(invalid_choice(line, key, value, "ASCII, SJIS, ISO_2022")),
            });
        }
        Key::DbcsStartCode => {
            raw.dbcs_start_code = Some(parse_hex_bytes(line, key, value)?);
        }
        Key::DbcsEndCode => {
            raw.dbcs_end_code = Some(parse_hex_bytes(line, key, value)?);
        }
        Key::VariableNewline => {
            raw.variable_newline = Some(match value {
                "OMIT" => VariableNewline::Omit,
                "INCLUDE" => VariableNewline::Include,
                _ => return Err(invalid_choice(line, key, value, "OMIT, INCLUDE")),
            });
        }
    }
    Ok(())
}

fn resolve(raw: RawDefinition, warnings: &mut Vec<DefinitionWarning>) -> Result<GenerationConfig> {
    let record_length = raw
        .record_length
        .ok_or(DefinitionError::MissingKey("RECORD_LENGTH"))?;
    let record_count = raw
        .record_count
        .ok_or(DefinitionError::MissingKey("RECORD_COUNT"))?;

    let mut config = GenerationConfig::new(
        raw.file_type.unwrap_or(FileType::Fixed),
        record_length,
        record_count,
    );
    if let Some(data_mode) = raw.data_mode {
        config.data_mode = data_mode;
    }
    if let Some(newline) = raw.newline {
        config.newline = newline;
    }
    if let Some(rdw_endian) = raw.rdw_endian {
        config.rdw_endian = rdw_endian;
    }
    if let Some(fill_policy) = raw.fill_policy {
        config.fill_policy = fill_policy;
    }
    if let Some(text_scheme) = raw.text_scheme {
        config.text_scheme = text_scheme;
    }
    if let Some(variable_newline) = raw.variable_newline {
        config.variable_newline = variable_newline;
    }

    let codes_given = raw.dbcs_start_code.is_some() || raw.dbcs_end_code.is_some();
    if config.text_scheme == TextScheme::MixedIso2022 && !codes_given {
        config.dbcs_start_code = ISO2022_JP_KANJI_IN.to_vec();
        config.dbcs_end_code = ISO2022_JP_ASCII_IN.to_vec();
    } else {
        config.dbcs_start_code = raw.dbcs_start_code.unwrap_or_default();
        config.dbcs_end_code = raw.dbcs_end_code.unwrap_or_default();
    }

    collect_unused_warnings(&config, &raw.lines, warnings);
    validate_config(&config)?;

    Ok(config)
}

fn collect_unused_warnings(
    config: &GenerationConfig,
    lines: &HashMap<Key, usize>,
    warnings: &mut Vec<DefinitionWarning>,
) {
    let line_of = |key: Key| lines.get(&key).copied();

    if let Some(line) = line_of(Key::Newline) {
        if config.data_mode == DataMode::Binary {
            warnings.push(DefinitionWarning::new(
                "newline_ignored",
                Some(line),
                "NEWLINE has no effect for BINARY data",
            ));
        } else if config.file_type == FileType::Variable
            && config.variable_newline == VariableNewline::Omit
        {
            warnings.push(DefinitionWarning::new(
                "newline_ignored",
                Some(line),
                "NEWLINE has no effect for VARIABLE files unless VARIABLE_NEWLINE=INCLUDE",
            ));
        }
    }

    if let Some(line) = line_of(Key::VariableNewline) {
        if config.file_type == FileType::Fixed {
            warnings.push(DefinitionWarning::new(
                "variable_newline_unused",
                Some(line),
                "VARIABLE_NEWLINE only applies to VARIABLE files",
            ));
        }
    }

    let random_text =
        config.fill_policy == FillPolicy::Random && config.data_mode == DataMode::Text;
    if let Some(line) = line_of(Key::TextType) {
        if !random_text {
            warnings.push(DefinitionWarning::new(
                "text_type_unused",
                Some(line),
                "TEXT_TYPE only applies to FILL_PATTERN=RANDOM with DATA_MODE=TEXT",
            ));
        }
    }

    if config.text_scheme != TextScheme::MixedIso2022 {
        for key in [Key::DbcsStartCode, Key::DbcsEndCode] {
            if let Some(line) = line_of(key) {
                warnings.push(DefinitionWarning::new(
                    "shift_code_unused",
                    Some(line),
                    format!("{} only applies to TEXT_TYPE=ISO_2022", key.name()),
                ));
            }
        }
    }
}

fn parse_positive<T>(line: usize, key: Key, value: &str) -> Result<T>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let parsed: T = value.parse().map_err(|_| DefinitionError::InvalidValue {
        line,
        key: key.name(),
        value: value.to_string(),
        reason: "expected a positive integer".to_string(),
    })?;
    if parsed == T::default() {
        return Err(DefinitionError::InvalidValue {
            line,
            key: key.name(),
            value: value.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(parsed)
}

fn parse_fill_pattern(line: usize, value: &[u8]) -> Result<FillPolicy> {
    if value == b"RANDOM" {
        return Ok(FillPolicy::Random);
    }

    if value.len() == 4 && value.starts_with(b"0x") {
        let byte = hex::decode(&value[2..])
            .ok()
            .and_then(|bytes| bytes.first().copied())
            .ok_or_else(|| DefinitionError::InvalidValue {
                line,
                key: Key::FillPattern.name(),
                value: String::from_utf8_lossy(value).into_owned(),
                reason: "expected a byte literal of the form 0xNN".to_string(),
            })?;
        return Ok(FillPolicy::FixedByte(byte));
    }

    Ok(FillPolicy::pattern(value))
}

fn ascii_value(line: usize, key: Key, value: &[u8]) -> Result<&str> {
    match std::str::from_utf8(value) {
        Ok(text) if text.is_ascii() => Ok(text),
        _ => Err(DefinitionError::InvalidValue {
            line,
            key: key.name(),
            value: String::from_utf8_lossy(value).into_owned(),
            reason: "expected ASCII text".to_string(),
        }),
    }
}

fn parse_hex_bytes(line: usize, key: Key, value: &str) -> Result<Vec<u8>> {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits.as_str());
    hex::decode(digits).map_err(|err| DefinitionError::InvalidValue {
        line,
        key: key.name(),
        value: value.to_string(),
        reason: format!("expected hex bytes: {err}"),
    })
}

fn invalid_choice(line: usize, key: Key, value: &str, expected: &str) -> DefinitionError {
    DefinitionError::InvalidValue {
        line,
        key: key.name(),
        value: value.to_string(),
        reason: format!("expected one of {expected}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_pattern_forms() {
        assert_eq!(parse_fill_pattern(1, b"RANDOM").unwrap(), FillPolicy::Random);
        assert_eq!(
            parse_fill_pattern(1, b"0xAB").unwrap(),
            FillPolicy::FixedByte(0xAB)
        );
        assert_eq!(
            parse_fill_pattern(1, b"0x0f").unwrap(),
            FillPolicy::FixedByte(0x0F)
        );
        assert_eq!(
            parse_fill_pattern(1, b"0x123").unwrap(),
            FillPolicy::StringPattern(b"0x123".to_vec())
        );
        assert_eq!(parse_fill_pattern(1, b"").unwrap(), FillPolicy::Default);
        assert!(matches!(
            parse_fill_pattern(3, b"0xZZ"),
            Err(DefinitionError::InvalidValue {
                line: 3,
                key: "FILL_PATTERN",
                ..
            })
        ));
    }

    #[test]
    fn hex_codes_accept_prefix_and_spaces() {
        assert_eq!(
            parse_hex_bytes(1, Key::DbcsStartCode, "0x1B2442").unwrap(),
            vec![0x1B, 0x24, 0x42]
        );
        assert_eq!(
            parse_hex_bytes(1, Key::DbcsStartCode, "1b 28 42").unwrap(),
            vec![0x1B, 0x28, 0x42]
        );
        assert!(parse_hex_bytes(1, Key::DbcsStartCode, "").unwrap().is_empty());
        assert!(parse_hex_bytes(1, Key::DbcsEndCode, "0x0").is_err());
    }

    #[test]
    fn positive_numbers_reject_zero_and_garbage() {
        assert_eq!(
            parse_positive::<usize>(1, Key::RecordLength, "80").unwrap(),
            80
        );
        assert!(parse_positive::<usize>(1, Key::RecordLength, "0").is_err());
        assert!(parse_positive::<u64>(1, Key::RecordCount, "-5").is_err());
        assert!(parse_positive::<u64>(1, Key::RecordCount, "ten").is_err());
    }
}

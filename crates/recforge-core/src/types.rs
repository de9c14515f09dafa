use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Record format of the generated dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    /// RECFM=F: every record is exactly `record_length` bytes.
    Fixed,
    /// RECFM=V: every record is framed by a 4-byte record descriptor word.
    Variable,
}

/// Interpretation of record content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataMode {
    Text,
    Binary,
}

/// Line terminator appended after fixed text records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Newline {
    Lf,
    Crlf,
    Cr,
    None,
}

impl Newline {
    /// Byte sequence written for this terminator.
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Newline::Lf => b"\n",
            Newline::Crlf => b"\r\n",
            Newline::Cr => b"\r",
            Newline::None => b"",
        }
    }
}

/// Byte order of the 16-bit length held in a record descriptor word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RdwEndian {
    Big,
    Little,
}

/// How record content bytes are produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FillPolicy {
    /// Random bytes, or random text when the data mode is text.
    Random,
    /// Every byte set to the given value.
    FixedByte(u8),
    /// The pattern repeated from offset zero in every record.
    StringPattern(Vec<u8>),
    /// Spaces for text data, zero bytes for binary data.
    Default,
}

impl FillPolicy {
    /// Build a pattern fill, falling back to `Default` for an empty pattern.
    pub fn pattern(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        if bytes.is_empty() {
            FillPolicy::Default
        } else {
            FillPolicy::StringPattern(bytes)
        }
    }
}

/// Character scheme used for random text fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TextScheme {
    /// Printable ASCII only.
    Ascii,
    /// Shift-JIS mix of ASCII and JIS X 0208 double-byte characters.
    ShiftJis,
    /// ASCII with double-byte regions bracketed by shift codes.
    MixedIso2022,
}

/// Whether a newline is carried inside variable records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VariableNewline {
    /// Variable records never receive a newline.
    #[default]
    Omit,
    /// The newline is appended to the content and covered by the RDW length.
    Include,
}

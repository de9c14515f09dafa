use thiserror::Error;

/// Invalid generation parameters, detected before any byte is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A numeric field that must be positive was zero.
    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },
    /// A variable record could declare a length the RDW cannot hold.
    #[error(
        "record_length {record_length} is too large for variable records: total length {total} exceeds {max}"
    )]
    RdwOverflow {
        record_length: usize,
        total: usize,
        max: usize,
    },
    /// A shift code is longer than the supported maximum.
    #[error("{field} is {len} bytes long; at most {max} bytes are allowed")]
    ShiftCodeTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    /// Only one of the two shift codes was provided.
    #[error("dbcs_start_code and dbcs_end_code must both be empty or both be set")]
    UnpairedShiftCodes,
}

/// Convenience alias for results returned by config checks.
pub type Result<T> = std::result::Result<T, ConfigError>;

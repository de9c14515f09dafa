use std::io::Write;

use rand::{Rng, RngCore};
use tracing::debug;

use recforge_core::{
    ConfigError, FileType, GenerationConfig, MAX_RDW_TOTAL, RDW_LENGTH, RdwEndian,
    validate_config,
};

use crate::errors::GenerationError;
use crate::fill::ContentFiller;
use crate::model::{GenerationReport, RecordStats};

/// Encode a record descriptor word: 16-bit total length, then two zero bytes.
pub fn encode_rdw(total_length: u16, endian: RdwEndian) -> [u8; 4] {
    let [high, low] = total_length.to_be_bytes();
    match endian {
        RdwEndian::Big => [high, low, 0, 0],
        RdwEndian::Little => [low, high, 0, 0],
    }
}

/// Chooses record lengths, fills content and writes framed records.
///
/// The content buffer is allocated once, sized for the longest record, and
/// reused for every record.
pub struct RecordFramer<'a> {
    config: &'a GenerationConfig,
    filler: ContentFiller<'a>,
    buffer: Vec<u8>,
}

impl<'a> RecordFramer<'a> {
    pub fn new(config: &'a GenerationConfig) -> Result<Self, GenerationError> {
        validate_config(config)?;

        let capacity = config.max_content_length();
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(capacity).map_err(|err| {
            GenerationError::Resource(format!(
                "failed to allocate {capacity}-byte record buffer: {err}"
            ))
        })?;
        buffer.resize(capacity, 0);

        Ok(Self {
            config,
            filler: ContentFiller::new(config),
            buffer,
        })
    }

    pub fn encoder_id(&self) -> Option<&'static str> {
        self.filler.encoder_id()
    }

    /// Content length of the next record: fixed, or uniform in `1..=record_length`.
    pub fn next_content_length(&self, rng: &mut dyn RngCore) -> usize {
        match self.config.file_type {
            FileType::Fixed => self.config.record_length,
            FileType::Variable => rng.random_range(1..=self.config.record_length),
        }
    }

    /// Generate and write one record.
    pub fn write_record<W: Write + ?Sized>(
        &mut self,
        rng: &mut dyn RngCore,
        sink: &mut W,
    ) -> Result<RecordStats, GenerationError> {
        let content_length = self.next_content_length(rng);
        let content = &mut self.buffer[..content_length];
        let encoded = self.filler.fill(content, rng);

        let framing_length = match self.config.file_type {
            FileType::Variable => {
                let newline = self.config.variable_newline_bytes();
                let total = content_length + newline.len() + RDW_LENGTH;
                let total = u16::try_from(total).map_err(|_| ConfigError::RdwOverflow {
                    record_length: self.config.record_length,
                    total,
                    max: MAX_RDW_TOTAL,
                })?;
                sink.write_all(&encode_rdw(total, self.config.rdw_endian))?;
                sink.write_all(content)?;
                sink.write_all(newline)?;
                RDW_LENGTH + newline.len()
            }
            FileType::Fixed => {
                let newline = self.config.newline_bytes();
                sink.write_all(content)?;
                sink.write_all(newline)?;
                newline.len()
            }
        };

        Ok(RecordStats {
            content_length,
            framing_length,
            encoded,
        })
    }
}

/// Write `record_count` framed records to `sink`, drawing randomness from `rng`.
///
/// Output is a pure function of the config and the rng state. Bytes already
/// written stay in the sink when an error stops the run.
pub fn generate<W: Write + ?Sized>(
    config: &GenerationConfig,
    rng: &mut dyn RngCore,
    sink: &mut W,
) -> Result<GenerationReport, GenerationError> {
    let mut framer = RecordFramer::new(config)?;
    let mut report = GenerationReport::new(framer.encoder_id());

    for index in 1..=config.record_count {
        let stats = framer.write_record(rng, sink)?;
        debug!(
            record = index,
            content_length = stats.content_length,
            framing_length = stats.framing_length,
            "record written"
        );
        report.record(&stats);
    }

    report.bytes_written = report.content_bytes + report.framing_bytes;
    Ok(report)
}

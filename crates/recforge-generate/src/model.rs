use serde::{Deserialize, Serialize};

use crate::text::EncodeSummary;

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Seed for the random stream. A time-based seed is used when absent.
    pub seed: Option<u64>,
    /// Capacity of the buffered writer placed in front of the sink.
    pub write_buffer_bytes: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            write_buffer_bytes: 64 * 1024,
        }
    }
}

/// What was written for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordStats {
    pub content_length: usize,
    /// RDW and newline bytes written around the content.
    pub framing_length: usize,
    pub encoded: Option<EncodeSummary>,
}

/// Summary of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: Option<u64>,
    pub records: u64,
    pub bytes_written: u64,
    pub content_bytes: u64,
    pub framing_bytes: u64,
    pub min_content_length: Option<usize>,
    pub max_content_length: Option<usize>,
    pub single_byte_chars: u64,
    pub double_byte_chars: u64,
    pub shift_regions: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoder: Option<String>,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(encoder: Option<&str>) -> Self {
        Self {
            encoder: encoder.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn record(&mut self, stats: &RecordStats) {
        self.records += 1;
        self.content_bytes += stats.content_length as u64;
        self.framing_bytes += stats.framing_length as u64;
        self.min_content_length = Some(
            self.min_content_length
                .map_or(stats.content_length, |min| min.min(stats.content_length)),
        );
        self.max_content_length = Some(
            self.max_content_length
                .map_or(stats.content_length, |max| max.max(stats.content_length)),
        );
        if let Some(encoded) = stats.encoded {
            self.single_byte_chars += encoded.single_byte as u64;
            self.double_byte_chars += encoded.double_byte as u64;
            self.shift_regions += encoded.shift_outs as u64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::ShiftState;

    #[test]
    fn report_tracks_length_range_and_characters() {
        let mut report = GenerationReport::new(Some("text.shift_jis"));
        for (content_length, double_byte) in [(10, 3), (4, 1), (7, 2)] {
            report.record(&RecordStats {
                content_length,
                framing_length: 4,
                encoded: Some(EncodeSummary {
                    single_byte: content_length - 2 * double_byte,
                    double_byte,
                    shift_outs: 0,
                    final_state: ShiftState::Sbcs,
                }),
            });
        }

        assert_eq!(report.records, 3);
        assert_eq!(report.content_bytes, 21);
        assert_eq!(report.framing_bytes, 12);
        assert_eq!(report.min_content_length, Some(4));
        assert_eq!(report.max_content_length, Some(10));
        assert_eq!(report.double_byte_chars, 6);
        assert_eq!(report.single_byte_chars, 9);
    }

    #[test]
    fn report_json_round_trip() {
        let mut report = GenerationReport::new(None);
        report.seed = Some(99);
        report.record(&RecordStats {
            content_length: 12,
            framing_length: 0,
            encoded: None,
        });

        let json = serde_json::to_value(&report).expect("serialize report");
        assert_eq!(json["seed"], 99);
        assert_eq!(json["min_content_length"], 12);
        assert!(json.get("encoder").is_none());

        let parsed: GenerationReport = serde_json::from_value(json).expect("deserialize report");
        assert_eq!(parsed, report);
    }
}

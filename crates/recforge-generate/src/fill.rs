use rand::RngCore;

use recforge_core::{DataMode, FillPolicy, GenerationConfig};

use crate::text::{EncodeSummary, TextEncoder, encoder_for, random_printable};

const TEXT_DEFAULT_BYTE: u8 = 0x20;
const BINARY_DEFAULT_BYTE: u8 = 0x00;

/// Produces record content according to the config's fill policy.
pub struct ContentFiller<'a> {
    config: &'a GenerationConfig,
    encoder: Option<Box<dyn TextEncoder + 'a>>,
}

impl<'a> ContentFiller<'a> {
    pub fn new(config: &'a GenerationConfig) -> Self {
        Self {
            config,
            encoder: encoder_for(config),
        }
    }

    /// Id of the multi-byte text encoder in use, if any.
    pub fn encoder_id(&self) -> Option<&'static str> {
        self.encoder.as_ref().map(|encoder| encoder.id())
    }

    /// Fill all of `buf`. Returns the encoder summary when a text encoder ran.
    pub fn fill(&self, buf: &mut [u8], rng: &mut dyn RngCore) -> Option<EncodeSummary> {
        match &self.config.fill_policy {
            FillPolicy::FixedByte(byte) => buf.fill(*byte),
            FillPolicy::StringPattern(pattern) if !pattern.is_empty() => {
                for (dst, src) in buf.iter_mut().zip(pattern.iter().cycle()) {
                    *dst = *src;
                }
            }
            FillPolicy::StringPattern(_) | FillPolicy::Default => buf.fill(self.default_byte()),
            FillPolicy::Random => return self.fill_random(buf, rng),
        }
        None
    }

    fn fill_random(&self, buf: &mut [u8], rng: &mut dyn RngCore) -> Option<EncodeSummary> {
        match (self.config.data_mode, &self.encoder) {
            (DataMode::Binary, _) => rng.fill_bytes(buf),
            (DataMode::Text, Some(encoder)) => return Some(encoder.encode(buf, rng)),
            (DataMode::Text, None) => {
                for byte in buf.iter_mut() {
                    *byte = random_printable(rng);
                }
            }
        }
        None
    }

    fn default_byte(&self) -> u8 {
        match self.config.data_mode {
            DataMode::Text => TEXT_DEFAULT_BYTE,
            DataMode::Binary => BINARY_DEFAULT_BYTE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use recforge_core::{FileType, TextScheme};

    fn config_with(fill_policy: FillPolicy, data_mode: DataMode) -> GenerationConfig {
        let mut config = GenerationConfig::new(FileType::Fixed, 64, 1);
        config.fill_policy = fill_policy;
        config.data_mode = data_mode;
        config
    }

    fn fill(config: &GenerationConfig, len: usize) -> Vec<u8> {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut buf = vec![0xEE; len];
        ContentFiller::new(config).fill(&mut buf, &mut rng);
        buf
    }

    #[test]
    fn fixed_byte_fills_every_byte() {
        let config = config_with(FillPolicy::FixedByte(0xAB), DataMode::Binary);
        assert_eq!(fill(&config, 10), vec![0xAB; 10]);
    }

    #[test]
    fn pattern_cycles_from_start() {
        let config = config_with(FillPolicy::pattern("abc"), DataMode::Text);
        assert_eq!(fill(&config, 7), b"abcabca".to_vec());
        assert_eq!(fill(&config, 2), b"ab".to_vec());
    }

    #[test]
    fn default_fill_depends_on_mode() {
        let config = config_with(FillPolicy::Default, DataMode::Text);
        assert_eq!(fill(&config, 5), b"     ".to_vec());

        let config = config_with(FillPolicy::Default, DataMode::Binary);
        assert_eq!(fill(&config, 5), vec![0u8; 5]);
    }

    #[test]
    fn empty_pattern_behaves_as_default() {
        let config = config_with(FillPolicy::StringPattern(Vec::new()), DataMode::Binary);
        assert_eq!(fill(&config, 4), vec![0u8; 4]);
    }

    #[test]
    fn random_ascii_text_is_printable() {
        let config = config_with(FillPolicy::Random, DataMode::Text);
        let buf = fill(&config, 500);
        assert!(buf.iter().all(|byte| (0x20..=0x7E).contains(byte)));
    }

    #[test]
    fn random_binary_covers_high_bytes() {
        let config = config_with(FillPolicy::Random, DataMode::Binary);
        let buf = fill(&config, 4096);
        assert!(buf.iter().any(|byte| *byte >= 0x80));
        assert!(buf.iter().any(|byte| *byte < 0x20));
    }

    #[test]
    fn multibyte_text_delegates_to_encoder() {
        let mut config = config_with(FillPolicy::Random, DataMode::Text);
        config.text_scheme = TextScheme::ShiftJis;
        let filler = ContentFiller::new(&config);
        assert_eq!(filler.encoder_id(), Some("text.shift_jis"));

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut buf = vec![0u8; 64];
        let summary = filler.fill(&mut buf, &mut rng).expect("encoder summary");
        assert_eq!(summary.single_byte + 2 * summary.double_byte, 64);
    }

    #[test]
    fn binary_random_ignores_text_scheme() {
        let mut config = config_with(FillPolicy::Random, DataMode::Binary);
        config.text_scheme = TextScheme::ShiftJis;
        let filler = ContentFiller::new(&config);
        assert_eq!(filler.encoder_id(), None);
    }
}

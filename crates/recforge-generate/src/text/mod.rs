//! Random text encoders for multi-byte character schemes.
//!
//! Encoders fill a caller-provided buffer completely and never write past its
//! end; double-byte characters are always written as whole pairs.

pub mod iso2022;
pub mod shift_jis;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use recforge_core::{GenerationConfig, TextScheme};

pub use iso2022::{MixedIso2022Encoder, ShiftLayout, Transition, dbcs_transition, sbcs_transition};
pub use shift_jis::{JisCode, ShiftJisEncoder};

/// Lowest printable ASCII byte.
pub const PRINTABLE_MIN: u8 = 0x20;
/// Highest printable ASCII byte.
pub const PRINTABLE_MAX: u8 = 0x7E;

/// Character set active at a position of a mixed-width buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftState {
    #[default]
    Sbcs,
    Dbcs,
}

/// What an encoder wrote into one buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeSummary {
    pub single_byte: usize,
    pub double_byte: usize,
    /// Number of double-byte regions opened.
    pub shift_outs: usize,
    pub final_state: ShiftState,
}

/// Fills a buffer with random text valid under one character scheme.
pub trait TextEncoder {
    fn id(&self) -> &'static str;

    fn encode(&self, buf: &mut [u8], rng: &mut dyn RngCore) -> EncodeSummary;
}

/// Encoder for the config's text scheme, if the fill needs one.
pub fn encoder_for(config: &GenerationConfig) -> Option<Box<dyn TextEncoder + '_>> {
    if !config.uses_multibyte_text() {
        return None;
    }
    match config.text_scheme {
        TextScheme::Ascii => None,
        TextScheme::ShiftJis => Some(Box::new(ShiftJisEncoder)),
        TextScheme::MixedIso2022 => Some(Box::new(MixedIso2022Encoder::new(
            &config.dbcs_start_code,
            &config.dbcs_end_code,
        ))),
    }
}

/// Uniform printable ASCII byte.
pub fn random_printable(rng: &mut dyn RngCore) -> u8 {
    rng.random_range(PRINTABLE_MIN..=PRINTABLE_MAX)
}

/// Uniform draw in `0..100`, used for every weighted coin.
pub(crate) fn percent(rng: &mut dyn RngCore) -> u32 {
    rng.random_range(0..100)
}

/// Bounded writer over a fixed buffer.
pub struct EncodeCursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> EncodeCursor<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_full(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Write `bytes` as one unit. Refuses (returns false) if they do not fit.
    pub fn put(&mut self, bytes: &[u8]) -> bool {
        let end = self.pos + bytes.len();
        match self.buf.get_mut(self.pos..end) {
            Some(dst) => {
                dst.copy_from_slice(bytes);
                self.pos = end;
                true
            }
            None => false,
        }
    }

    pub fn put_byte(&mut self, byte: u8) -> bool {
        self.put(&[byte])
    }

    /// Fill whatever is left with `byte`.
    pub fn pad(&mut self, byte: u8) {
        if let Some(rest) = self.buf.get_mut(self.pos..) {
            rest.fill(byte);
        }
        self.pos = self.buf.len();
    }
}

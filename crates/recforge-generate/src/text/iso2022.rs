//! Mixed SBCS/DBCS text with explicit shift codes, in the style of ISO-2022-JP.
//!
//! The encoder is a two-state machine. Transition rules are plain functions of
//! the bytes remaining and the shift-code lengths, so the forced exits can be
//! checked without a random source.

use rand::RngCore;

use super::{
    EncodeCursor, EncodeSummary, JisCode, ShiftState, TextEncoder, percent, random_printable,
};

/// Chance (in percent) of switching state at a position where switching is allowed.
const SHIFT_PERCENT: u32 = 30;
const ESCAPE: u8 = 0x1B;

/// Shift codes bracketing a double-byte region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftLayout<'a> {
    pub start: &'a [u8],
    pub end: &'a [u8],
}

impl<'a> ShiftLayout<'a> {
    pub fn new(start: &'a [u8], end: &'a [u8]) -> Self {
        Self { start, end }
    }

    /// Bytes needed to open a region, write one character and close it again.
    pub fn min_region(&self) -> usize {
        self.start.len() + 2 + self.end.len()
    }
}

/// Next step of the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Write the start code and enter DBCS.
    EmitStart,
    /// Write one ASCII byte and stay in SBCS.
    EmitSingle,
    /// Write one double-byte character and stay in DBCS.
    EmitDouble,
    /// Write the end code and return to SBCS.
    EmitEnd { forced: bool },
}

/// Transition out of SBCS. `coin` is flipped only when a region would fit.
pub fn sbcs_transition(
    remaining: usize,
    layout: &ShiftLayout<'_>,
    coin: impl FnOnce() -> bool,
) -> Transition {
    if remaining >= layout.min_region() && coin() {
        Transition::EmitStart
    } else {
        Transition::EmitSingle
    }
}

/// Transition out of DBCS. `coin` is not flipped when the exit is forced
/// because only the end code still fits.
pub fn dbcs_transition(
    remaining: usize,
    layout: &ShiftLayout<'_>,
    coin: impl FnOnce() -> bool,
) -> Transition {
    let end_len = layout.end.len();
    if remaining <= end_len {
        return Transition::EmitEnd { forced: true };
    }
    if coin() {
        return Transition::EmitEnd { forced: false };
    }
    if remaining >= 2 + end_len {
        Transition::EmitDouble
    } else {
        Transition::EmitEnd { forced: true }
    }
}

/// Random mixed text using the configured shift codes.
#[derive(Debug, Clone, Copy)]
pub struct MixedIso2022Encoder<'a> {
    layout: ShiftLayout<'a>,
}

impl<'a> MixedIso2022Encoder<'a> {
    pub fn new(start: &'a [u8], end: &'a [u8]) -> Self {
        Self {
            layout: ShiftLayout::new(start, end),
        }
    }

    pub fn layout(&self) -> ShiftLayout<'a> {
        self.layout
    }
}

impl TextEncoder for MixedIso2022Encoder<'_> {
    fn id(&self) -> &'static str {
        "text.iso2022_mixed"
    }

    fn encode(&self, buf: &mut [u8], rng: &mut dyn RngCore) -> EncodeSummary {
        let layout = self.layout;
        let mut cursor = EncodeCursor::new(buf);
        let mut summary = EncodeSummary::default();
        let mut state = ShiftState::Sbcs;

        while !cursor.is_full() {
            let remaining = cursor.remaining();
            let transition = match state {
                ShiftState::Sbcs => {
                    sbcs_transition(remaining, &layout, || percent(rng) < SHIFT_PERCENT)
                }
                ShiftState::Dbcs => {
                    dbcs_transition(remaining, &layout, || percent(rng) < SHIFT_PERCENT)
                }
            };

            let written = match transition {
                Transition::EmitStart => {
                    state = ShiftState::Dbcs;
                    summary.shift_outs += 1;
                    cursor.put(layout.start)
                }
                Transition::EmitSingle => {
                    summary.single_byte += 1;
                    cursor.put_byte(random_sbcs_byte(rng))
                }
                Transition::EmitDouble => {
                    summary.double_byte += 1;
                    cursor.put(&JisCode::random_kanji(rng).to_jis7())
                }
                Transition::EmitEnd { .. } => {
                    state = ShiftState::Sbcs;
                    cursor.put(layout.end)
                }
            };
            if !written {
                break;
            }
        }
        // an empty end code still fits a full buffer
        if state == ShiftState::Dbcs && cursor.put(layout.end) {
            state = ShiftState::Sbcs;
        }
        if !cursor.is_full() && state == ShiftState::Sbcs {
            cursor.pad(b' ');
        }

        summary.final_state = state;
        summary
    }
}

fn random_sbcs_byte(rng: &mut dyn RngCore) -> u8 {
    loop {
        let byte = random_printable(rng);
        if byte != ESCAPE {
            return byte;
        }
    }
}

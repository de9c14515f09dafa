//! Random Shift-JIS text drawn from JIS X 0208 symbols, kana and level-1 kanji.

use rand::{Rng, RngCore};

use super::{EncodeCursor, EncodeSummary, TextEncoder, percent, random_printable};

/// Share of positions (in percent) that start a double-byte character.
const DOUBLE_BYTE_PERCENT: u32 = 70;

/// A JIS X 0208 code point addressed by row (ku) and cell (ten), both `1..=94`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JisCode {
    row: u8,
    cell: u8,
}

impl JisCode {
    pub fn new(row: u8, cell: u8) -> Option<Self> {
        if (1..=94).contains(&row) && (1..=94).contains(&cell) {
            Some(Self { row, cell })
        } else {
            None
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn cell(self) -> u8 {
        self.cell
    }

    /// Pick a code point from the well-defined rows: symbols, kana and level-1 kanji.
    pub fn random_sjis(rng: &mut dyn RngCore) -> Self {
        let (row, cell) = match percent(rng) {
            0..10 => (1, rng.random_range(1..=60)),
            10..20 => (4, rng.random_range(1..=83)),
            20..30 => (5, rng.random_range(1..=86)),
            _ => {
                let row = rng.random_range(16..=47);
                // row 47 ends at cell 51
                let last_cell = if row == 47 { 51 } else { 94 };
                (row, rng.random_range(1..=last_cell))
            }
        };
        Self { row, cell }
    }

    /// Pick a level-1 kanji, rows `16..=47`, any cell.
    pub fn random_kanji(rng: &mut dyn RngCore) -> Self {
        Self {
            row: rng.random_range(16..=47),
            cell: rng.random_range(1..=94),
        }
    }

    /// Shift-JIS lead/trail pair.
    pub fn to_shift_jis(self) -> [u8; 2] {
        let lead = if self.row <= 62 {
            0x81 + (self.row - 1) / 2
        } else {
            0xE0 + (self.row - 63) / 2
        };
        let trail = if self.row % 2 == 1 {
            let trail = 0x40 + (self.cell - 1);
            // 0x7F is not a valid trail byte; later cells shift up by one
            if trail >= 0x7F { trail + 1 } else { trail }
        } else {
            0x9F + (self.cell - 1)
        };
        [lead, trail]
    }

    /// 7-bit JIS pair as used inside ISO-2022-JP double-byte regions.
    pub fn to_jis7(self) -> [u8; 2] {
        [0x20 + self.row, 0x20 + self.cell]
    }
}

/// Random Shift-JIS text: 70% double-byte characters where two bytes remain.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftJisEncoder;

impl TextEncoder for ShiftJisEncoder {
    fn id(&self) -> &'static str {
        "text.shift_jis"
    }

    fn encode(&self, buf: &mut [u8], rng: &mut dyn RngCore) -> EncodeSummary {
        let mut cursor = EncodeCursor::new(buf);
        let mut summary = EncodeSummary::default();

        while !cursor.is_full() {
            let written = if cursor.remaining() >= 2 && percent(rng) < DOUBLE_BYTE_PERCENT {
                summary.double_byte += 1;
                cursor.put(&JisCode::random_sjis(rng).to_shift_jis())
            } else {
                summary.single_byte += 1;
                cursor.put_byte(random_printable(rng))
            };
            if !written {
                break;
            }
        }
        cursor.pad(b' ');

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn code(row: u8, cell: u8) -> JisCode {
        JisCode::new(row, cell).expect("valid code point")
    }

    #[test]
    fn converts_known_code_points() {
        // ideographic space, hiragana a, katakana small a, first and last level-1 kanji
        assert_eq!(code(1, 1).to_shift_jis(), [0x81, 0x40]);
        assert_eq!(code(4, 2).to_shift_jis(), [0x82, 0xA0]);
        assert_eq!(code(5, 1).to_shift_jis(), [0x83, 0x40]);
        assert_eq!(code(16, 1).to_shift_jis(), [0x88, 0x9F]);
        assert_eq!(code(47, 51).to_shift_jis(), [0x98, 0x72]);
    }

    #[test]
    fn odd_rows_skip_0x7f() {
        assert_eq!(code(1, 63).to_shift_jis(), [0x81, 0x7E]);
        assert_eq!(code(1, 64).to_shift_jis(), [0x81, 0x80]);
        assert_eq!(code(1, 94).to_shift_jis(), [0x81, 0x9E]);
        assert_eq!(code(2, 94).to_shift_jis(), [0x81, 0xFC]);
    }

    #[test]
    fn rows_above_62_use_upper_lead_range() {
        assert_eq!(code(63, 1).to_shift_jis(), [0xE0, 0x40]);
        assert_eq!(code(94, 94).to_shift_jis(), [0xEF, 0xFC]);
    }

    #[test]
    fn every_generated_row_and_cell_is_a_valid_pair() {
        let ranges: Vec<(u8, u8)> = [(1, 60), (4, 83), (5, 86)]
            .into_iter()
            .chain((16..=47).map(|row| (row, if row == 47 { 51 } else { 94 })))
            .collect();

        let mut seen = std::collections::HashSet::new();
        for (row, last_cell) in ranges {
            for cell in 1..=last_cell {
                let [lead, trail] = code(row, cell).to_shift_jis();
                assert!((0x81..=0x9F).contains(&lead), "lead {lead:#x} for {row}/{cell}");
                assert!((0x40..=0xFC).contains(&trail), "trail {trail:#x} for {row}/{cell}");
                assert_ne!(trail, 0x7F);
                assert!(seen.insert([lead, trail]), "duplicate pair for {row}/{cell}");
            }
        }
    }

    #[test]
    fn random_code_points_stay_in_defined_rows() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..5000 {
            let jis = JisCode::random_sjis(&mut rng);
            match jis.row() {
                1 => assert!((1..=60).contains(&jis.cell())),
                4 => assert!((1..=83).contains(&jis.cell())),
                5 => assert!((1..=86).contains(&jis.cell())),
                47 => assert!((1..=51).contains(&jis.cell())),
                16..=46 => assert!((1..=94).contains(&jis.cell())),
                other => panic!("unexpected row {other}"),
            }
        }
    }

    #[test]
    fn jis7_pairs_are_printable() {
        assert_eq!(code(16, 1).to_jis7(), [0x30, 0x21]);
        assert_eq!(code(47, 94).to_jis7(), [0x4F, 0x7E]);
    }

    #[test]
    fn one_byte_buffer_gets_ascii() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut buf = [0u8; 1];
        let summary = ShiftJisEncoder.encode(&mut buf, &mut rng);
        assert_eq!(summary.single_byte, 1);
        assert_eq!(summary.double_byte, 0);
        assert!((0x20..=0x7E).contains(&buf[0]));
    }
}

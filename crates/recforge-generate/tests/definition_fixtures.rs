use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use recforge_definition::load_definition;
use recforge_generate::generate;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../definitions/examples")
        .join(name)
}

fn generate_fixture(name: &str) -> (Vec<u8>, recforge_generate::GenerationReport) {
    let loaded = load_definition(&fixture(name)).expect("load definition");
    assert!(loaded.warnings.is_empty(), "{name}: {:?}", loaded.warnings);
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut out = Vec::new();
    let report = generate(&loaded.config, &mut rng, &mut out).expect("generate");
    (out, report)
}

#[test]
fn fixed_text_fixture_is_space_filled() {
    let (out, report) = generate_fixture("fixed_text.def");
    assert_eq!(out.len(), 100 * 82);
    assert_eq!(report.records, 100);
    for record in out.chunks(82) {
        assert!(record[..80].iter().all(|b| *b == b' '));
        assert_eq!(&record[80..], b"\r\n");
    }
}

#[test]
fn variable_binary_fixture_uses_little_endian_rdws() {
    let (out, report) = generate_fixture("variable_binary.def");
    assert_eq!(report.records, 250);

    let mut offset = 0;
    let mut records = 0;
    while offset < out.len() {
        let total = u16::from_le_bytes([out[offset], out[offset + 1]]) as usize;
        assert!((5..=516).contains(&total));
        offset += total;
        records += 1;
    }
    assert_eq!(offset, out.len());
    assert_eq!(records, 250);
}

#[test]
fn sjis_fixture_reports_double_byte_characters() {
    let (out, report) = generate_fixture("sjis_text.def");
    assert_eq!(out.len(), 20 * 65);
    assert_eq!(report.encoder.as_deref(), Some("text.shift_jis"));
    assert!(report.double_byte_chars > 0);
}

#[test]
fn iso2022_fixture_uses_so_si() {
    let (out, report) = generate_fixture("iso2022_text.def");
    assert_eq!(report.records, 40);
    assert!(report.shift_regions > 0);
    let (mut so, mut si) = (0, 0);
    let mut offset = 0;
    while offset < out.len() {
        let total = u16::from_be_bytes([out[offset], out[offset + 1]]) as usize;
        let body = &out[offset + 4..offset + total];
        so += body.iter().filter(|b| **b == 0x0E).count() as u64;
        si += body.iter().filter(|b| **b == 0x0F).count() as u64;
        offset += total;
    }
    assert_eq!(so, report.shift_regions);
    assert_eq!(si, report.shift_regions);
}

use recforge_core::{FileType, FillPolicy, GenerationConfig, RdwEndian, TextScheme};

#[test]
fn serializes_config_deterministically() {
    let mut config = GenerationConfig::new(FileType::Variable, 120, 3);
    config.rdw_endian = RdwEndian::Little;
    config.fill_policy = FillPolicy::FixedByte(0xAB);

    let json = serde_json::to_string_pretty(&config).expect("serialize config");
    let expected = r#"{
  "file_type": "variable",
  "record_length": 120,
  "data_mode": "text",
  "newline": "lf",
  "record_count": 3,
  "rdw_endian": "little",
  "fill_policy": {
    "kind": "fixed_byte",
    "value": 171
  },
  "text_scheme": "ascii",
  "dbcs_start_code": [],
  "dbcs_end_code": [],
  "variable_newline": "omit"
}"#;
    assert_eq!(json, expected);
}

#[test]
fn config_round_trips_through_json() {
    let mut config = GenerationConfig::new(FileType::Fixed, 80, 10);
    config.fill_policy = FillPolicy::Random;
    config.text_scheme = TextScheme::MixedIso2022;
    config.dbcs_start_code = vec![0x0E];
    config.dbcs_end_code = vec![0x0F];

    let json = serde_json::to_string(&config).expect("serialize config");
    let parsed: GenerationConfig = serde_json::from_str(&json).expect("parse config");
    assert_eq!(parsed, config);
}

#[test]
fn unit_fill_policies_serialize_as_tags() {
    let json = serde_json::to_value(FillPolicy::Default).expect("serialize fill");
    assert_eq!(json, serde_json::json!({"kind": "default"}));

    let json = serde_json::to_value(FillPolicy::pattern("ab")).expect("serialize fill");
    assert_eq!(
        json,
        serde_json::json!({"kind": "string_pattern", "value": [97, 98]})
    );
}

use std::env;
use std::fs::File;
use std::path::PathBuf;

use recforge_definition::load_definition;
use recforge_generate::{GenerateOptions, GenerationEngine};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut definition_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--definition" => definition_path = args.next().map(PathBuf::from),
            "--out" => output_path = args.next().map(PathBuf::from),
            "--seed" => seed = args.next().map(|value| value.parse()).transpose()?,
            _ => {
                if definition_path.is_none() {
                    definition_path = Some(PathBuf::from(arg));
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let definition_path = definition_path.ok_or("missing --definition path")?;
    let output_path = output_path.ok_or("missing --out path")?;
    let loaded = load_definition(&definition_path)?;

    let engine = GenerationEngine::new(GenerateOptions {
        seed,
        ..GenerateOptions::default()
    });
    let report = engine.run(&loaded.config, File::create(&output_path)?)?;

    println!(
        "records={} bytes={} seed={}",
        report.records,
        report.bytes_written,
        report.seed.unwrap_or_default()
    );
    Ok(())
}

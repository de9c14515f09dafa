mod registry;

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use recforge_definition::{DefinitionError, load_definition};
use recforge_generate::{GenerateOptions, GenerationEngine, GenerationError};
use registry::{RunSummary, init_logging, write_run_summary};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("{0}")]
    Definition(#[from] DefinitionError),
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error("failed to create output file {}: {source}", path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

#[derive(Parser, Debug)]
#[command(name = "recforge", version, about = "Fixed and variable-length record file generator")]
struct Cli {
    /// Definition file describing the records to generate.
    #[arg(short = 'd', long, value_name = "PATH")]
    definition: PathBuf,
    /// Output data file.
    #[arg(short = 'o', long, value_name = "PATH", required_unless_present = "check")]
    output: Option<PathBuf>,
    /// Seed for the random stream; a time-based seed is used otherwise.
    #[arg(long)]
    seed: Option<u64>,
    /// Write a JSON run summary to this path.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
    /// Append JSON log lines to this path.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Validate the definition and exit without generating.
    #[arg(long, default_value_t = false)]
    check: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        definition,
        output,
        seed,
        report,
        log_file,
        check,
    } = cli;

    init_logging(log_file.as_deref())?;

    let run_id = Uuid::new_v4().to_string();
    let started_at = chrono::Utc::now();
    let timer = Instant::now();
    tracing::info!(event = "run_started", run_id = %run_id, definition = %definition.display());

    let loaded = load_definition(&definition)?;
    tracing::info!(
        event = "definition_loaded",
        warnings = loaded.warnings.len(),
        file_type = ?loaded.config.file_type,
        record_length = loaded.config.record_length,
        records = loaded.config.record_count
    );

    let mut summary = RunSummary::new(
        run_id,
        started_at,
        definition,
        loaded.config,
        loaded.warnings,
    );

    if !check {
        let output = output.ok_or_else(|| {
            CliError::InvalidArgs("--output is required unless --check is given".to_string())
        })?;
        let file = File::create(&output).map_err(|source| CliError::Output {
            path: output.clone(),
            source,
        })?;

        let engine = GenerationEngine::new(GenerateOptions {
            seed,
            ..GenerateOptions::default()
        });
        let generation = engine.run(&summary.config, file)?;
        tracing::info!(
            event = "output_written",
            path = %output.display(),
            bytes = generation.bytes_written
        );

        summary.output = Some(output);
        summary.report = Some(generation);
    }

    if let Some(report_path) = report {
        write_run_summary(&report_path, &summary)?;
        tracing::info!(event = "report_written", path = %report_path.display());
    }

    tracing::info!(
        event = "run_finished",
        status = "success",
        check,
        duration_ms = timer.elapsed().as_millis() as u64
    );
    Ok(())
}

use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use recforge_core::GenerationConfig;
use recforge_definition::DefinitionWarning;
use recforge_generate::GenerationReport;

use super::{RegistryError, RegistryResult};

/// JSON summary of one CLI invocation.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub started_at: String,
    pub definition: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub config: GenerationConfig,
    pub warnings: Vec<DefinitionWarning>,
    /// Absent for `--check` runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<GenerationReport>,
}

impl RunSummary {
    pub fn new(
        run_id: String,
        started_at: DateTime<Utc>,
        definition: PathBuf,
        config: GenerationConfig,
        warnings: Vec<DefinitionWarning>,
    ) -> Self {
        Self {
            run_id,
            started_at: started_at.to_rfc3339(),
            definition,
            output: None,
            config,
            warnings,
            report: None,
        }
    }
}

pub fn write_run_summary(path: &Path, summary: &RunSummary) -> RegistryResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, summary).map_err(RegistryError::from)
}

use serde::Deserialize;

use crate::ingest::IngestionConfig;
use crate::report::DEFAULT_TOP_PARAMS;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub ingestion: IngestionSection,
    pub report: ReportSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestionSection {
    pub data_directory: String,
    /// Cap on the number of input files per run; absent = all files.
    #[serde(default)]
    pub max_files: Option<usize>,
    pub workers: usize,
    /// Fail the run with an error when the batch gathered zero observations.
    #[serde(default)]
    pub require_observations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportSection {
    /// How many parameters the ranked changing-parameters list keeps.
    #[serde(default = "default_top_params")]
    pub top_params: usize,
    /// Optional CSV path for the per-group change counts.
    #[serde(default)]
    pub export_path: Option<String>,
}

fn default_top_params() -> usize {
    DEFAULT_TOP_PARAMS
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.ingestion.data_directory.is_empty(),
            "ingestion.data_directory must be non-empty"
        );
        anyhow::ensure!(
            self.ingestion.workers > 0,
            "ingestion.workers must be > 0, got {}",
            self.ingestion.workers
        );
        if let Some(max_files) = self.ingestion.max_files {
            anyhow::ensure!(
                max_files > 0,
                "ingestion.max_files must be > 0 when set, got {}",
                max_files
            );
        }
        anyhow::ensure!(
            self.report.top_params > 0,
            "report.top_params must be > 0, got {}",
            self.report.top_params
        );
        if let Some(ref path) = self.report.export_path {
            anyhow::ensure!(!path.is_empty(), "report.export_path must be non-empty when set");
        }
        Ok(())
    }
}

impl IngestionSection {
    pub fn to_ingestion_config(&self) -> IngestionConfig {
        IngestionConfig {
            data_directory: self.data_directory.clone().into(),
            max_files: self.max_files,
            workers: self.workers,
        }
    }
}

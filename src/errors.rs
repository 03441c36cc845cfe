// Error taxonomy for the drift pipeline.
// Per-record and per-file errors stay at the ingestion boundary; the core
// stages (flatten, sort, detect, report) are total over well-formed input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriftError {
    /// A snapshot record is missing a required identity field. Skipped and
    /// logged per record; never aborts the batch.
    #[error("snapshot record missing required field '{field}'")]
    MalformedRecord { field: &'static str },

    /// A single input file could not be read or parsed. The file is excluded
    /// from the gathered set and the run continues.
    #[error("ingesting '{file}': {reason}")]
    FileIngestion { file: String, reason: String },

    /// An epoch timestamp that does not map to a calendar date.
    #[error("timestamp {0} is out of range")]
    InvalidTimestamp(i64),

    /// Raised only when a caller explicitly requires at least one observation.
    #[error("observation store is empty")]
    EmptyStore,
}

impl DriftError {
    pub fn file_ingestion(file: impl Into<String>, reason: impl ToString) -> Self {
        DriftError::FileIngestion {
            file: file.into(),
            reason: reason.to_string(),
        }
    }
}

// Ingestion coordinator: enumerates input files, fans the per-file read +
// flatten out across the tokio runtime, and gathers accepted results into
// one ObservationStore. A failed file is excluded and counted; it never
// aborts the batch. The core stages never touch this module.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use futures_util::stream;

use crate::errors::DriftError;
use crate::flatten::flatten_snapshot;
use crate::models::RawSnapshot;
use crate::store::ObservationStore;

/// Ingestion settings, carried explicitly (no process-global client).
#[derive(Debug, Clone)]
pub struct IngestionConfig {
    pub data_directory: PathBuf,
    /// Cap on the number of files taken from the directory listing.
    pub max_files: Option<usize>,
    /// Max file reads in flight at once.
    pub workers: usize,
}

/// Everything one batch run gathered: the merged store plus unit statistics.
#[derive(Debug)]
pub struct IngestedBatch {
    pub store: ObservationStore,
    /// Files successfully read, parsed, and merged.
    pub accepted: usize,
    /// Files excluded (unreadable, unparsable name or content).
    pub failed: usize,
    /// Records skipped inside accepted files (missing identity fields).
    pub skipped_records: u64,
}

/// One file's flattening result before the merge.
#[derive(Debug)]
struct FileObservations {
    observations: Vec<crate::models::FlatObservation>,
    skipped_records: u64,
}

pub struct IngestionCoordinator {
    config: IngestionConfig,
}

impl IngestionCoordinator {
    pub fn new(config: IngestionConfig) -> Self {
        Self { config }
    }

    /// `.out` files in the data directory, sorted by name so the merge order
    /// (and therefore the store's sequence numbers) is deterministic.
    pub fn list_input_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(&self.config.data_directory)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "out"))
            .collect();
        files.sort();
        if let Some(cap) = self.config.max_files {
            files.truncate(cap);
        }
        Ok(files)
    }

    /// Reads and flattens every input file, up to `workers` at a time, then
    /// merges the accepted results. Barrier semantics: the returned batch is
    /// complete, nothing is streamed. `buffered` keeps completion order equal
    /// to the sorted file order.
    pub async fn ingest(&self) -> anyhow::Result<IngestedBatch> {
        let files = self.list_input_files()?;
        let dispatched = files.len();

        let results: Vec<Result<FileObservations, DriftError>> = stream::iter(files)
            .map(|path| async move {
                let unit = path.display().to_string();
                tokio::task::spawn_blocking(move || read_snapshot_file(&path))
                    .await
                    .map_err(|e| DriftError::file_ingestion(unit, e))?
            })
            .buffered(self.config.workers.max(1))
            .collect()
            .await;

        let mut store = ObservationStore::new();
        let mut accepted = 0usize;
        let mut failed = 0usize;
        let mut skipped_records = 0u64;

        for result in results {
            match result {
                Ok(file_obs) => {
                    accepted += 1;
                    skipped_records += file_obs.skipped_records;
                    store.append_all(file_obs.observations);
                }
                Err(e) => {
                    failed += 1;
                    tracing::warn!(error = %e, operation = "ingest_file", "input file rejected");
                }
            }
        }

        tracing::info!(
            accepted,
            dispatched,
            skipped_records,
            observations = store.len(),
            "accepted {} / {}",
            accepted,
            dispatched
        );

        Ok(IngestedBatch {
            store,
            accepted,
            failed,
            skipped_records,
        })
    }
}

/// Ingestion timestamp from a filename: the third `-`-delimited token,
/// before the extension (e.g. `site-sonar-1704067200.out` -> 1704067200).
pub fn parse_file_timestamp(file_name: &str) -> Result<i64, DriftError> {
    let token = file_name
        .split('-')
        .nth(2)
        .ok_or_else(|| DriftError::file_ingestion(file_name, "no timestamp token in name"))?;
    let digits = token.split('.').next().unwrap_or(token);
    digits
        .parse::<i64>()
        .map_err(|e| DriftError::file_ingestion(file_name, format!("bad timestamp token: {}", e)))
}

/// Reads one newline-delimited JSON file and flattens every record.
/// An unreadable file or unparsable line fails the whole unit; a parsed
/// record without identity fields is skipped, logged, and counted.
fn read_snapshot_file(path: &Path) -> Result<FileObservations, DriftError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| DriftError::file_ingestion(path.display().to_string(), "non-UTF-8 name"))?
        .to_string();
    let timestamp = parse_file_timestamp(&file_name)?;

    tracing::debug!(file = %file_name, timestamp, operation = "read_snapshot_file", "processing file");

    let file = std::fs::File::open(path)
        .map_err(|e| DriftError::file_ingestion(file_name.as_str(), e))?;
    let reader = std::io::BufReader::new(file);

    let mut observations = Vec::new();
    let mut skipped_records = 0u64;
    for line in reader.lines() {
        let line = line.map_err(|e| DriftError::file_ingestion(file_name.as_str(), e))?;
        if line.trim().is_empty() {
            continue;
        }
        let snapshot: RawSnapshot = serde_json::from_str(line.trim())
            .map_err(|e| DriftError::file_ingestion(file_name.as_str(), e))?;
        match flatten_snapshot(&snapshot, timestamp) {
            Ok(batch) => observations.extend(batch),
            Err(e @ DriftError::MalformedRecord { .. }) => {
                skipped_records += 1;
                tracing::warn!(error = %e, file = %file_name, "record skipped");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(FileObservations {
        observations,
        skipped_records,
    })
}

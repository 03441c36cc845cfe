// Record flattening: one RawSnapshot -> per-parameter FlatObservation rows.
// Pure transformation; ingestion (file IO, dispatch) stays in ingest.

use chrono::DateTime;

use crate::errors::DriftError;
use crate::models::{FlatObservation, ParamValue, RawSnapshot};

/// Result keys that never produce an observation (e.g. very lengthy
/// *CONDOR* blobs and per-run bookkeeping).
pub const EXCLUDED_KEYS: [&str; 4] = [
    "EXITCODE",
    "EXECUTION_TIME",
    "CONDOR_MACHINE_CLASSAD_CONTENTS",
    "CONDOR_JOB_CLASSAD_CONTENTS",
];

fn is_excluded(key: &str) -> bool {
    EXCLUDED_KEYS.contains(&key)
}

/// Flattens one snapshot into (host_ce, date, param_name, param_value) rows.
/// `timestamp` is epoch seconds supplied by the caller (from the input
/// filename), truncated to a UTC calendar date. Composite values are
/// normalized to their canonical JSON string; scalars pass through.
///
/// Empty `test_results_json` yields an empty vec, not an error. A record
/// without `hostname` or `ce_name` is a caller contract violation and fails
/// with `MalformedRecord`.
pub fn flatten_snapshot(
    snapshot: &RawSnapshot,
    timestamp: i64,
) -> Result<Vec<FlatObservation>, DriftError> {
    let hostname = snapshot
        .hostname
        .as_deref()
        .ok_or(DriftError::MalformedRecord { field: "hostname" })?;
    let ce_name = snapshot
        .ce_name
        .as_deref()
        .ok_or(DriftError::MalformedRecord { field: "ce_name" })?;

    let date = DateTime::from_timestamp(timestamp, 0)
        .ok_or(DriftError::InvalidTimestamp(timestamp))?
        .date_naive();
    let host_ce = format!("{}_{}", hostname, ce_name);

    let mut observations = Vec::new();
    for (test, results) in &snapshot.test_results_json {
        for (key, value) in results {
            if is_excluded(key) {
                continue;
            }
            observations.push(FlatObservation {
                host_ce: host_ce.clone(),
                date,
                param_name: format!("{}_{}", test, key),
                param_value: ParamValue::from_json(value.clone()),
            });
        }
    }
    Ok(observations)
}

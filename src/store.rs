// Observation store: append-only during ingestion, frozen by sorting.
// Every appended row gets a monotonically increasing ingestion sequence
// number; it is the explicit tie-break between observations that share
// (host_ce, param_name, date), so change detection is deterministic even
// when several files land on the same calendar day.

use crate::errors::DriftError;
use crate::models::FlatObservation;

/// One stored row: the observation plus its ingestion sequence number.
#[derive(Debug, Clone)]
pub struct StoredObservation {
    pub seq: u64,
    pub obs: FlatObservation,
}

/// In-memory collection of all flat observations for one run.
#[derive(Debug, Default)]
pub struct ObservationStore {
    rows: Vec<StoredObservation>,
    next_seq: u64,
}

impl ObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one batch of observations (typically one file's worth) into the
    /// store, assigning sequence numbers in arrival order.
    pub fn append_all(&mut self, batch: Vec<FlatObservation>) {
        self.rows.reserve(batch.len());
        for obs in batch {
            self.rows.push(StoredObservation {
                seq: self.next_seq,
                obs,
            });
            self.next_seq += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// For callers that require at least one observation before analyzing.
    /// A zero-row store is otherwise valid and yields zero groups.
    pub fn require_non_empty(&self) -> Result<(), DriftError> {
        if self.rows.is_empty() {
            return Err(DriftError::EmptyStore);
        }
        Ok(())
    }

    /// Freezes the store into the total order change detection requires:
    /// (host_ce, param_name, date, seq). seq is unique, so the order is a
    /// deterministic function of arrival order regardless of sort stability.
    pub fn sort_for_change_detection(self) -> SortedObservations {
        let mut rows = self.rows;
        rows.sort_by(|a, b| {
            (&a.obs.host_ce, &a.obs.param_name, a.obs.date, a.seq).cmp(&(
                &b.obs.host_ce,
                &b.obs.param_name,
                b.obs.date,
                b.seq,
            ))
        });
        SortedObservations { rows }
    }
}

/// Witness that the rows are ordered by (host_ce, param_name, date, seq).
/// Only `sort_for_change_detection` produces one, which makes the sort-order
/// precondition of change detection hold by construction.
#[derive(Debug)]
pub struct SortedObservations {
    rows: Vec<StoredObservation>,
}

impl SortedObservations {
    pub fn rows(&self) -> &[StoredObservation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

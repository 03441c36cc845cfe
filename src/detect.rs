// Change detection: single forward pass over the sorted observations.
// Rows for one (host_ce, param_name) group are contiguous in a
// SortedObservations, so a group boundary is just a key change between
// adjacent rows. Within a group, a row counts as changed when its value
// differs from the immediately preceding row's value; the first row of a
// group has no predecessor and never counts.

use crate::models::{ChangeRecord, ParamValue};
use crate::store::SortedObservations;

/// Produces one ChangeRecord per distinct (host_ce, param_name) group.
/// Records come out in group order, i.e. sorted by (host_ce, param_name).
/// O(n) over the rows; the only carried state is the current group key,
/// the previous value, and the running counter.
pub fn detect_changes(sorted: &SortedObservations) -> Vec<ChangeRecord> {
    let mut records: Vec<ChangeRecord> = Vec::new();

    let mut current_key: Option<(&str, &str)> = None;
    let mut previous_value: Option<&ParamValue> = None;
    let mut change_count: u64 = 0;

    for row in sorted.rows() {
        let key = (row.obs.host_ce.as_str(), row.obs.param_name.as_str());
        match current_key {
            Some(group) if group == key => {
                if previous_value != Some(&row.obs.param_value) {
                    change_count += 1;
                }
            }
            Some((host_ce, param_name)) => {
                records.push(ChangeRecord {
                    host_ce: host_ce.to_string(),
                    param_name: param_name.to_string(),
                    change_count,
                });
                current_key = Some(key);
                change_count = 0;
            }
            None => {
                current_key = Some(key);
                change_count = 0;
            }
        }
        previous_value = Some(&row.obs.param_value);
    }

    if let Some((host_ce, param_name)) = current_key {
        records.push(ChangeRecord {
            host_ce: host_ce.to_string(),
            param_name: param_name.to_string(),
            change_count,
        });
    }

    records
}

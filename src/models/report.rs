// Derived report models: per-group change counts and the fleet summary

use serde::Serialize;

/// Change count for one (host_ce, param_name) group: how many date-adjacent
/// observations in the group differ from their predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub host_ce: String,
    pub param_name: String,
    pub change_count: u64,
}

/// Fleet-wide statistics over one run's ChangeRecords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total_hosts: usize,
    pub hosts_with_changes: usize,
    /// (param_name, summed change_count), descending by count, ties broken
    /// by name ascending, truncated to the configured top-N.
    pub top_changing_parameters: Vec<(String, u64)>,
}

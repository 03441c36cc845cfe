// Fleet reporting: summary statistics over one run's ChangeRecords, plus the
// optional delimited export of the per-group counts.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::Path;

use crate::models::{ChangeRecord, FleetSummary};

/// Default cap on the ranked parameter list.
pub const DEFAULT_TOP_PARAMS: usize = 200;

impl FleetSummary {
    /// Derives the summary: distinct hosts, hosts whose summed change_count
    /// is > 0, and parameters ranked by total change_count (descending,
    /// name-ascending on ties, truncated to `top_n`). Empty input yields
    /// zeros and an empty ranking.
    pub fn from_change_records(records: &[ChangeRecord], top_n: usize) -> Self {
        let mut hosts: BTreeSet<&str> = BTreeSet::new();
        let mut changes_per_host: BTreeMap<&str, u64> = BTreeMap::new();
        let mut changes_per_param: BTreeMap<&str, u64> = BTreeMap::new();

        for record in records {
            hosts.insert(&record.host_ce);
            *changes_per_host.entry(&record.host_ce).or_default() += record.change_count;
            *changes_per_param.entry(&record.param_name).or_default() += record.change_count;
        }

        let hosts_with_changes = changes_per_host.values().filter(|&&n| n > 0).count();

        // BTreeMap iteration is name-ascending, and the sort below is stable,
        // so equal counts keep that order.
        let mut ranked: Vec<(String, u64)> = changes_per_param
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(top_n);

        FleetSummary {
            total_hosts: hosts.len(),
            hosts_with_changes,
            top_changing_parameters: ranked,
        }
    }
}

/// Human-readable summary, printed to stdout by the binary.
pub fn render_summary(summary: &FleetSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total number of hosts: {}\n", summary.total_hosts));
    out.push_str(&format!(
        "Number of hosts with at least one parameter change: {}\n",
        summary.hosts_with_changes
    ));
    out.push_str("\nTop most frequently changing parameters:\n");
    for (name, count) in &summary.top_changing_parameters {
        out.push_str(&format!("{}  {}\n", name, count));
    }
    out
}

/// Writes the per-group change counts as CSV (host_ce,param_name,change_count).
/// Pass-through export; fields are written as-is.
pub fn export_change_counts(records: &[ChangeRecord], path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    writeln!(writer, "host_ce,param_name,change_count")?;
    for record in records {
        writeln!(
            writer,
            "{},{},{}",
            record.host_ce, record.param_name, record.change_count
        )?;
    }
    writer.flush()?;
    tracing::info!(
        operation = "export_change_counts",
        rows = records.len(),
        path = %path.display(),
        "change counts exported"
    );
    Ok(())
}

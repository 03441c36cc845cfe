// Fleet summary tests: host counts, parameter ranking, CSV export

use sonardrift::models::{ChangeRecord, FleetSummary};
use sonardrift::report::{DEFAULT_TOP_PARAMS, export_change_counts, render_summary};

fn record(host_ce: &str, param_name: &str, change_count: u64) -> ChangeRecord {
    ChangeRecord {
        host_ce: host_ce.into(),
        param_name: param_name.into(),
        change_count,
    }
}

#[test]
fn empty_input_yields_zeroed_summary() {
    let summary = FleetSummary::from_change_records(&[], DEFAULT_TOP_PARAMS);
    assert_eq!(summary.total_hosts, 0);
    assert_eq!(summary.hosts_with_changes, 0);
    assert!(summary.top_changing_parameters.is_empty());
}

#[test]
fn counts_distinct_hosts() {
    let records = vec![
        record("h1", "p1", 0),
        record("h1", "p2", 0),
        record("h2", "p1", 0),
    ];
    let summary = FleetSummary::from_change_records(&records, DEFAULT_TOP_PARAMS);
    assert_eq!(summary.total_hosts, 2);
}

#[test]
fn hosts_with_changes_requires_positive_sum() {
    let records = vec![
        record("h1", "p1", 0),
        record("h1", "p2", 0),
        record("h2", "p1", 1),
        record("h3", "p1", 0),
        record("h3", "p2", 4),
    ];
    let summary = FleetSummary::from_change_records(&records, DEFAULT_TOP_PARAMS);
    assert_eq!(summary.total_hosts, 3);
    assert_eq!(summary.hosts_with_changes, 2);
}

#[test]
fn ranks_parameters_by_summed_count_descending() {
    let records = vec![
        record("h1", "quiet", 1),
        record("h1", "noisy", 5),
        record("h2", "noisy", 3),
        record("h2", "quiet", 1),
    ];
    let summary = FleetSummary::from_change_records(&records, DEFAULT_TOP_PARAMS);
    assert_eq!(
        summary.top_changing_parameters,
        vec![("noisy".to_string(), 8), ("quiet".to_string(), 2)]
    );
}

#[test]
fn equal_counts_tie_break_by_name_ascending() {
    let records = vec![
        record("h1", "zeta", 2),
        record("h1", "alpha", 2),
        record("h1", "mid", 2),
    ];
    let summary = FleetSummary::from_change_records(&records, DEFAULT_TOP_PARAMS);
    let names: Vec<&str> = summary
        .top_changing_parameters
        .iter()
        .map(|(n, _)| n.as_str())
        .collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
}

#[test]
fn ranking_truncates_to_top_n() {
    let records: Vec<ChangeRecord> = (0..10u64)
        .map(|i| record("h1", &format!("p{:02}", i), 10 - i))
        .collect();
    let summary = FleetSummary::from_change_records(&records, 3);
    assert_eq!(summary.top_changing_parameters.len(), 3);
    assert_eq!(summary.top_changing_parameters[0], ("p00".to_string(), 10));
}

#[test]
fn render_summary_includes_counts_and_ranking() {
    let records = vec![record("h1", "p1", 2), record("h2", "p1", 0)];
    let summary = FleetSummary::from_change_records(&records, DEFAULT_TOP_PARAMS);
    let text = render_summary(&summary);
    assert!(text.contains("Total number of hosts: 2"));
    assert!(text.contains("Number of hosts with at least one parameter change: 1"));
    assert!(text.contains("p1  2"));
}

#[test]
fn export_writes_header_and_rows() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("change_counts.csv");
    let records = vec![record("h1_ce", "t_P", 3), record("h2_ce", "t_P", 0)];
    export_change_counts(&records, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec!["host_ce,param_name,change_count", "h1_ce,t_P,3", "h2_ce,t_P,0"]
    );
}

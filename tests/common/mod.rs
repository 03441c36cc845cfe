// Shared test helpers

#![allow(dead_code)]

use std::collections::BTreeMap;

use serde_json::{Value, json};
use sonardrift::models::RawSnapshot;

/// 2024-01-01T00:00:00Z
pub const BASE_TS: i64 = 1_704_067_200;
pub const DAY_SECS: i64 = 86_400;

pub fn snapshot(hostname: &str, ce_name: &str, tests: &[(&str, &[(&str, Value)])]) -> RawSnapshot {
    let mut test_results_json = BTreeMap::new();
    for (test, results) in tests {
        let mut map = BTreeMap::new();
        for (key, value) in *results {
            map.insert(key.to_string(), value.clone());
        }
        test_results_json.insert(test.to_string(), map);
    }
    RawSnapshot {
        hostname: Some(hostname.to_string()),
        ce_name: Some(ce_name.to_string()),
        test_results_json,
    }
}

/// The known-outcome fleet fixture: three hosts over three consecutive days.
/// PARAM1 alternates with day parity (v0, v1, v0 -> 2 changes per host),
/// PARAM2 takes a fresh value every day (2 changes per host), and the
/// EXITCODE/EXECUTION_TIME keys must be dropped by flattening.
pub fn fleet_fixture() -> Vec<(RawSnapshot, i64)> {
    let mut out = Vec::new();
    for day in 0..3i64 {
        let timestamp = BASE_TS + day * DAY_SECS;
        for host_id in 1..=3 {
            out.push((
                snapshot(
                    &format!("host{}.example.com", host_id),
                    "ExampleCE",
                    &[
                        (
                            "test1",
                            &[
                                ("EXITCODE", json!(0)),
                                ("EXECUTION_TIME", json!(10)),
                                ("PARAM1", json!(format!("value_{}_{}", host_id, day % 2))),
                            ],
                        ),
                        (
                            "test2",
                            &[
                                ("EXITCODE", json!(0)),
                                ("EXECUTION_TIME", json!(20)),
                                ("PARAM2", json!(format!("value_{}", day))),
                            ],
                        ),
                    ],
                ),
                timestamp,
            ));
        }
    }
    out
}

/// Writes one newline-delimited JSON input file named for the given
/// timestamp (`site-sonar-<ts>.out`), one record per line.
pub fn write_out_file(dir: &std::path::Path, timestamp: i64, lines: &[Value]) -> std::path::PathBuf {
    let path = dir.join(format!("site-sonar-{}.out", timestamp));
    let content: String = lines
        .iter()
        .map(|v| format!("{}\n", v))
        .collect();
    std::fs::write(&path, content).expect("write .out file");
    path
}

/// One fixture day as raw JSON lines, for writing input files.
pub fn fixture_day_lines(day: i64) -> Vec<Value> {
    (1..=3)
        .map(|host_id| {
            json!({
                "hostname": format!("host{}.example.com", host_id),
                "ce_name": "ExampleCE",
                "last_updated": BASE_TS + day * DAY_SECS,
                "test_results_json": {
                    "test1": {
                        "EXITCODE": 0,
                        "EXECUTION_TIME": 10,
                        "PARAM1": format!("value_{}_{}", host_id, day % 2),
                    },
                    "test2": {
                        "EXITCODE": 0,
                        "EXECUTION_TIME": 20,
                        "PARAM2": format!("value_{}", day),
                    },
                },
            })
        })
        .collect()
}

//! Per-serial test counts over the kept rows.

use std::collections::{BTreeMap, HashSet};

use crate::filter::is_passing;
use crate::reader::SourceRow;

/// Unique test IDs seen for one serial, and how many of them passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialSummary {
    pub serial_name: String,
    pub total_tests: usize,
    pub passing_tests: usize,
}

/// One entry per serial with at least one non-empty test ID, sorted by serial.
pub fn serial_summary(rows: &[SourceRow]) -> Vec<SerialSummary> {
    let mut tests: BTreeMap<&str, (HashSet<&str>, HashSet<&str>)> = BTreeMap::new();
    for row in rows {
        let Some(id) = row.test_id.as_deref().filter(|id| !id.is_empty()) else {
            continue;
        };
        let (all, passing) = tests.entry(row.record.serial_name.as_str()).or_default();
        all.insert(id);
        if is_passing(row.result.as_deref()) {
            passing.insert(id);
        }
    }

    tests
        .into_iter()
        .map(|(serial, (all, passing))| SerialSummary {
            serial_name: serial.to_string(),
            total_tests: all.len(),
            passing_tests: passing.len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qc_core::MeasurementRecord;

    fn row(serial: &str, test_id: Option<&str>, result: &str) -> SourceRow {
        SourceRow {
            record: MeasurementRecord::new(serial, "p", "d", 1.0, 0.0, 2.0),
            result: Some(result.to_string()),
            test_id: test_id.map(str::to_string),
            test_time: None,
            comparator: None,
        }
    }

    #[test]
    fn counts_unique_and_passing_tests_per_serial() {
        let rows = vec![
            row("SN2", Some("t1"), "pass"),
            row("SN1", Some("t1"), "PASS"),
            row("SN1", Some("t1"), "pass"),
            row("SN1", Some("t2"), "fail"),
            row("SN1", Some("t3"), "True"),
            row("SN3", Some(""), "pass"),
            row("SN3", None, "pass"),
        ];
        let summary = serial_summary(&rows);

        assert_eq!(
            summary,
            vec![
                SerialSummary {
                    serial_name: "SN1".to_string(),
                    total_tests: 3,
                    passing_tests: 2,
                },
                SerialSummary {
                    serial_name: "SN2".to_string(),
                    total_tests: 1,
                    passing_tests: 1,
                },
            ]
        );
    }
}

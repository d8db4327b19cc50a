//! Test-run selection: passing results, comparator and most recent runs.

use std::collections::{HashMap, HashSet};

use qc_config::RunFilter;

use crate::reader::SourceRow;

pub(crate) fn is_passing(result: Option<&str>) -> bool {
    matches!(
        result.map(str::to_ascii_lowercase).as_deref(),
        Some("pass") | Some("true")
    )
}

/// Apply `filter` to `rows`, keeping input order.
pub fn apply_filter(mut rows: Vec<SourceRow>, filter: &RunFilter) -> Vec<SourceRow> {
    if let Some(comparator) = &filter.comparator {
        rows.retain(|r| r.comparator.as_deref() == Some(comparator.as_str()));
    }

    if filter.passing_only {
        rows.retain(|r| is_passing(r.result.as_deref()));
    }

    if let Some(max_runs) = filter.max_runs_per_serial {
        let keep = latest_runs(&rows, max_runs);
        let mask: Vec<bool> = rows
            .iter()
            .map(|r| match r.test_id.as_deref() {
                Some(id) => keep.contains(&(r.record.serial_name.as_str(), id)),
                None => false,
            })
            .collect();
        let mut mask = mask.into_iter();
        rows.retain(|_| mask.next().unwrap_or(false));
    }

    rows
}

// The `max_runs` most recent test IDs per serial. A test's time is the
// latest timestamp among its rows; timestamps compare as text, which holds
// for ISO-8601.
fn latest_runs(rows: &[SourceRow], max_runs: usize) -> HashSet<(&str, &str)> {
    let mut latest: HashMap<(&str, &str), &str> = HashMap::new();
    for row in rows {
        let (Some(id), Some(time)) = (row.test_id.as_deref(), row.test_time.as_deref()) else {
            continue;
        };
        if id.is_empty() {
            continue;
        }
        let entry = latest
            .entry((row.record.serial_name.as_str(), id))
            .or_insert(time);
        if time > *entry {
            *entry = time;
        }
    }

    let mut per_serial: HashMap<&str, Vec<(&str, &str)>> = HashMap::new();
    for ((serial, id), time) in latest {
        per_serial.entry(serial).or_default().push((time, id));
    }

    let mut keep = HashSet::new();
    for (serial, mut runs) in per_serial {
        runs.sort_by(|a, b| b.cmp(a));
        for (_, id) in runs.into_iter().take(max_runs) {
            keep.insert((serial, id));
        }
    }
    keep
}

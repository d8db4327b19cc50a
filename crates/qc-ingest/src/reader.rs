//! CSV reading and row coercion.

use std::fs::File;
use std::io;
use std::path::Path;

use qc_config::{ColumnAliases, RunFilter};
use qc_core::{MeasurementRecord, Real, coerce_value};

use crate::columns::{Column, ColumnMap};
use crate::filter::apply_filter;
use crate::summary::{SerialSummary, serial_summary};
use crate::{IngestError, IngestResult};

/// A coerced measurement plus the run metadata the filter looks at.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub record: MeasurementRecord,
    pub result: Option<String>,
    pub test_id: Option<String>,
    pub test_time: Option<String>,
    pub comparator: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub rows_read: usize,
    /// Rows dropped for missing identity fields or unusable limits.
    pub rows_skipped: usize,
    /// Rows removed by the run filter.
    pub rows_filtered: usize,
    /// Kept rows whose value did not coerce to a number.
    pub non_numeric_values: usize,
}

#[derive(Debug, Clone)]
pub struct Ingested {
    pub records: Vec<MeasurementRecord>,
    pub stats: IngestStats,
    /// Test counts per serial over the kept rows.
    pub serials: Vec<SerialSummary>,
}

/// Columns the input must carry for `filter` to be applied.
pub fn required_columns(filter: &RunFilter) -> Vec<Column> {
    let mut required = Column::REQUIRED.to_vec();
    if filter.passing_only {
        required.push(Column::Result);
    }
    if filter.max_runs_per_serial.is_some() {
        required.extend([Column::TestId, Column::TestTime]);
    }
    if filter.comparator.is_some() {
        required.push(Column::Comparator);
    }
    required
}

pub fn read_csv_path(
    path: &Path,
    aliases: &ColumnAliases,
    filter: &RunFilter,
) -> IngestResult<Ingested> {
    let file = File::open(path).map_err(|e| IngestError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    read_csv(file, aliases, filter)
}

pub fn read_csv<R: io::Read>(
    input: R,
    aliases: &ColumnAliases,
    filter: &RunFilter,
) -> IngestResult<Ingested> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let map = ColumnMap::resolve(&headers, aliases, &required_columns(filter))?;

    let mut stats = IngestStats::default();
    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = result?;
        stats.rows_read += 1;
        // +2: one for the header, one for 1-based line numbers
        match coerce_row(&map, &row) {
            Some(source) => rows.push(source),
            None => {
                tracing::debug!(line = i + 2, "skipping row with missing identity or limits");
                stats.rows_skipped += 1;
            }
        }
    }

    if stats.rows_read == 0 {
        return Err(IngestError::Empty);
    }

    let before = rows.len();
    let rows = if filter.is_active() {
        apply_filter(rows, filter)
    } else {
        rows
    };
    stats.rows_filtered = before - rows.len();
    let serials = serial_summary(&rows);

    let records: Vec<MeasurementRecord> = rows.into_iter().map(|r| r.record).collect();
    stats.non_numeric_values = records.iter().filter(|r| r.value.is_nan()).count();

    tracing::info!(
        rows_read = stats.rows_read,
        rows_skipped = stats.rows_skipped,
        rows_filtered = stats.rows_filtered,
        kept = records.len(),
        serials = serials.len(),
        "ingested measurement table"
    );

    Ok(Ingested {
        records,
        stats,
        serials,
    })
}

fn coerce_row(map: &ColumnMap, row: &csv::StringRecord) -> Option<SourceRow> {
    let serial = map.get(row, Column::SerialName).filter(|s| !s.is_empty())?;
    let parameter = map.get(row, Column::ParameterName).filter(|s| !s.is_empty())?;
    let description = map.get(row, Column::Description).unwrap_or("");
    let lower = parse_limit(map.get(row, Column::LowerLimit)?)?;
    let upper = parse_limit(map.get(row, Column::UpperLimit)?)?;
    let value = map.get(row, Column::Value).map(coerce_value).unwrap_or(Real::NAN);

    let owned = |c: Column| map.get(row, c).map(str::to_string);
    Some(SourceRow {
        record: MeasurementRecord::new(serial, parameter, description, value, lower, upper),
        result: owned(Column::Result),
        test_id: owned(Column::TestId),
        test_time: owned(Column::TestTime),
        comparator: owned(Column::Comparator),
    })
}

fn parse_limit(cell: &str) -> Option<Real> {
    let v = coerce_value(cell);
    v.is_finite().then_some(v)
}

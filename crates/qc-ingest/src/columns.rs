//! Header resolution against canonical column names and their aliases.

use csv::StringRecord;
use qc_config::ColumnAliases;

use crate::{IngestError, IngestResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    SerialName,
    ParameterName,
    Description,
    Value,
    LowerLimit,
    UpperLimit,
    Result,
    TestId,
    TestTime,
    Comparator,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::SerialName,
        Column::ParameterName,
        Column::Description,
        Column::Value,
        Column::LowerLimit,
        Column::UpperLimit,
        Column::Result,
        Column::TestId,
        Column::TestTime,
        Column::Comparator,
    ];

    /// Columns every input must provide.
    pub const REQUIRED: [Column; 6] = [
        Column::SerialName,
        Column::ParameterName,
        Column::Description,
        Column::Value,
        Column::LowerLimit,
        Column::UpperLimit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::SerialName => "serial_name",
            Column::ParameterName => "parameter_name",
            Column::Description => "description",
            Column::Value => "value",
            Column::LowerLimit => "lower_limit",
            Column::UpperLimit => "upper_limit",
            Column::Result => "result",
            Column::TestId => "test_id",
            Column::TestTime => "test_time",
            Column::Comparator => "comparator",
        }
    }

    fn aliases(self, aliases: &ColumnAliases) -> &[String] {
        match self {
            Column::SerialName => aliases.serial_name.as_slice(),
            Column::ParameterName => aliases.parameter_name.as_slice(),
            Column::Description => aliases.description.as_slice(),
            Column::Value => aliases.value.as_slice(),
            Column::LowerLimit => aliases.lower_limit.as_slice(),
            Column::UpperLimit => aliases.upper_limit.as_slice(),
            Column::Result => aliases.result.as_slice(),
            Column::TestId => aliases.test_id.as_slice(),
            Column::TestTime => aliases.test_time.as_slice(),
            Column::Comparator => aliases.comparator.as_slice(),
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Where each canonical column sits in the input header.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    indices: [Option<usize>; 10],
}

impl ColumnMap {
    /// Resolve every known column in `headers`, failing if any of
    /// `required` is absent. All missing columns are reported at once.
    pub fn resolve(
        headers: &StringRecord,
        aliases: &ColumnAliases,
        required: &[Column],
    ) -> IngestResult<Self> {
        let headers: Vec<&str> = headers
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}'))
            .collect();

        let mut map = ColumnMap::default();
        for column in Column::ALL {
            let found = std::iter::once(column.name())
                .chain(column.aliases(aliases).iter().map(String::as_str))
                .find_map(|candidate| headers.iter().position(|h| *h == candidate));
            if let Some(idx) = found {
                tracing::debug!(column = column.name(), header = headers[idx], "resolved column");
            }
            map.indices[column.slot()] = found;
        }

        let missing: Vec<String> = required
            .iter()
            .filter(|c| map.index(**c).is_none())
            .map(|c| c.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(IngestError::MissingColumns {
                missing,
                available: headers.iter().map(|h| h.to_string()).collect(),
            });
        }

        Ok(map)
    }

    pub fn index(&self, column: Column) -> Option<usize> {
        self.indices[column.slot()]
    }

    /// Trimmed cell for `column`, if the column exists and the row is long
    /// enough to hold it.
    pub fn get<'r>(&self, row: &'r StringRecord, column: Column) -> Option<&'r str> {
        self.index(column).and_then(|i| row.get(i)).map(str::trim)
    }
}

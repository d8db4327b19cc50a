//! Config validation logic.

use qc_core::{BinMode, MAX_BINS};

use crate::schema::{ColumnAliases, ReportConfig};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate column alias '{alias}' for {first} and {second}")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_config(config: &ReportConfig) -> Result<(), ValidationError> {
    if config.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    if !config.pad_fraction.is_finite() || config.pad_fraction < 0.0 {
        return Err(invalid(
            "pad_fraction",
            config.pad_fraction,
            "must be finite and non-negative",
        ));
    }

    match config.bins {
        BinMode::FixedCount { count } => {
            if count == 0 || count > MAX_BINS {
                return Err(invalid(
                    "bins.count",
                    count,
                    &format!("must be between 1 and {MAX_BINS}"),
                ));
            }
        }
        BinMode::ToleranceFraction { fraction } => {
            if !fraction.is_finite() || fraction <= 0.0 {
                return Err(invalid(
                    "bins.fraction",
                    fraction,
                    "must be finite and positive",
                ));
            }
        }
    }

    if !(0.0..0.5).contains(&config.marker_inset) {
        return Err(invalid(
            "marker_inset",
            config.marker_inset,
            "must be in [0, 0.5)",
        ));
    }

    if config.output_dir.as_os_str().is_empty() {
        return Err(invalid("output_dir", "\"\"", "must not be empty"));
    }

    if config.chart.width == 0 || config.chart.height == 0 {
        return Err(invalid(
            "chart",
            format!("{}x{}", config.chart.width, config.chart.height),
            "width and height must be positive",
        ));
    }

    if config.filter.max_runs_per_serial == Some(0) {
        return Err(invalid(
            "filter.max_runs_per_serial",
            0,
            "must be at least 1 when set",
        ));
    }

    validate_aliases(&config.columns)
}

fn validate_aliases(columns: &ColumnAliases) -> Result<(), ValidationError> {
    let mut seen: Vec<(&str, &str)> = Vec::new();
    for (column, aliases) in columns.entries() {
        for alias in std::iter::once(column).chain(aliases.iter().map(String::as_str)) {
            match seen.iter().find(|(a, _)| *a == alias) {
                Some((_, owner)) if *owner != column => {
                    return Err(ValidationError::DuplicateAlias {
                        alias: alias.to_string(),
                        first: owner.to_string(),
                        second: column.to_string(),
                    });
                }
                Some(_) => {}
                None => seen.push((alias, column)),
            }
        }
    }
    Ok(())
}

impl ColumnAliases {
    /// `(canonical name, aliases)` for every known column.
    pub fn entries(&self) -> [(&'static str, &[String]); 10] {
        [
            ("serial_name", self.serial_name.as_slice()),
            ("parameter_name", self.parameter_name.as_slice()),
            ("description", self.description.as_slice()),
            ("value", self.value.as_slice()),
            ("lower_limit", self.lower_limit.as_slice()),
            ("upper_limit", self.upper_limit.as_slice()),
            ("result", self.result.as_slice()),
            ("test_id", self.test_id.as_slice()),
            ("test_time", self.test_time.as_slice()),
            ("comparator", self.comparator.as_slice()),
        ]
    }
}

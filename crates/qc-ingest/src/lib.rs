//! qc-ingest: CSV measurement tables into `MeasurementRecord`s.

pub mod columns;
pub mod filter;
pub mod reader;
pub mod summary;

use std::path::PathBuf;

pub use columns::{Column, ColumnMap};
pub use filter::apply_filter;
pub use reader::{IngestStats, Ingested, SourceRow, read_csv, read_csv_path, required_columns};
pub use summary::{SerialSummary, serial_summary};

pub type IngestResult<T> = Result<T, IngestError>;

#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("Failed to open input file: {path}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required columns: {} (available: {})", missing.join(", "), available.join(", "))]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("Input has a header but no data rows")]
    Empty,
}

//! End-to-end report generation from a CSV export.

use std::path::{Path, PathBuf};

use qc_config::{ReportConfig, validate_config};
use qc_core::{LimitWindow, group_records};
use qc_ingest::{IngestStats, Ingested, SerialSummary, read_csv_path};
use qc_render::PlottersRenderer;

use crate::error::AppResult;
use crate::output::OutputDir;
use crate::pipeline::{ReportSummary, run_report};

/// Result of one `generate_report` call.
#[derive(Debug, Clone)]
pub struct ReportResponse {
    pub output_dir: PathBuf,
    pub ingest: IngestStats,
    pub serials: Vec<SerialSummary>,
    pub summary: ReportSummary,
}

/// Group overview for listing.
#[derive(Debug, Clone)]
pub struct GroupInfo {
    pub identity: String,
    pub record_count: usize,
    pub numeric_count: usize,
    /// `None` when the group's limits cannot form a window.
    pub window: Option<LimitWindow>,
}

/// Load and filter the records of `csv_path` per `config`.
pub fn load_records(csv_path: &Path, config: &ReportConfig) -> AppResult<Ingested> {
    Ok(read_csv_path(csv_path, &config.columns, &config.filter)?)
}

/// Read `csv_path`, render one chart per group into `config.output_dir`.
///
/// Input and configuration problems are fatal; per-group failures are only
/// counted in the returned summary.
pub fn generate_report(csv_path: &Path, config: &ReportConfig) -> AppResult<ReportResponse> {
    validate_config(config)?;
    let Ingested {
        records,
        stats,
        serials,
    } = load_records(csv_path, config)?;

    let output = OutputDir::prepare(&config.output_dir)?;
    let renderer = PlottersRenderer::new(
        output.path().to_path_buf(),
        config.chart.width,
        config.chart.height,
    );

    let summary = run_report(&records, config, &renderer);
    Ok(ReportResponse {
        output_dir: output.path().to_path_buf(),
        ingest: stats,
        serials,
        summary,
    })
}

/// Summarize the groups `csv_path` would produce under `config`.
pub fn list_groups(csv_path: &Path, config: &ReportConfig) -> AppResult<Vec<GroupInfo>> {
    let records = load_records(csv_path, config)?.records;
    Ok(group_records(&records, config.grouping)
        .iter()
        .map(|group| GroupInfo {
            identity: group.identity(),
            record_count: group.records.len(),
            numeric_count: group.numeric_values().len(),
            window: LimitWindow::derive(group.lower_limit, group.upper_limit, config.pad_fraction)
                .ok(),
        })
        .collect())
}

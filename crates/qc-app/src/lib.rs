//! Shared application service layer for qcplot.
//!
//! Ties ingest, the core computations and the renderer together for the
//! CLI: loading exports, running the per-group pipeline and preparing the
//! output directory.

pub mod error;
pub mod output;
pub mod pipeline;
pub mod report_service;

pub use error::{AppError, AppResult};
pub use output::OutputDir;
pub use pipeline::{
    GroupOutcome, GroupStatus, ReportSummary, assign_artifact_names, plan_group, run_report,
};
pub use report_service::{GroupInfo, ReportResponse, generate_report, list_groups, load_records};

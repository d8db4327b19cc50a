//! qc-render: PNG report charts via plotters.

pub mod chart;

use std::panic;
use std::path::PathBuf;

use qc_core::{ChartPlan, ReportSink};

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("Output directory does not exist: {0}")]
    MissingOutputDir(PathBuf),

    #[error("Plotting error: {0}")]
    Drawing(String),

    #[error("Plotting backend panicked while drawing {0}")]
    Panicked(String),
}

/// Writes `<output_dir>/<artifact_name>.png` for every plan.
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    output_dir: PathBuf,
    size: (u32, u32),
}

impl PlottersRenderer {
    pub fn new(output_dir: PathBuf, width: u32, height: u32) -> Self {
        Self {
            output_dir,
            size: (width, height),
        }
    }

    pub fn artifact_path(&self, plan: &ChartPlan) -> PathBuf {
        self.output_dir.join(format!("{}.png", plan.artifact_name))
    }
}

impl ReportSink for PlottersRenderer {
    type Error = RenderError;

    fn render(&self, plan: &ChartPlan) -> RenderResult<PathBuf> {
        if !self.output_dir.is_dir() {
            return Err(RenderError::MissingOutputDir(self.output_dir.clone()));
        }
        let path = self.artifact_path(plan);
        let draw = || chart::draw_report(plan, &path, self.size);

        panic::catch_unwind(panic::AssertUnwindSafe(draw))
            .map_err(|_| RenderError::Panicked(plan.artifact_name.clone()))?
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        tracing::debug!(path = %path.display(), "wrote chart");
        Ok(path)
    }
}

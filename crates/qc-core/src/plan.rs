//! Drawable primitives for one parameter's report, and the sink that
//! turns them into an artifact.

use std::path::PathBuf;

use crate::bins::BinSpec;
use crate::classify::Marker;
use crate::numeric::Real;
use crate::window::LimitWindow;

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub x: Real,
    pub label: String,
}

/// Per-unit scatter view.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlan {
    pub x_range: (Real, Real),
    pub points: Vec<(Real, Real)>,
    pub markers: Vec<Marker>,
    pub ticks: Vec<AxisTick>,
    pub x_label: String,
}

/// Distribution view.
#[derive(Debug, Clone, PartialEq)]
pub enum HistogramPlan {
    Bins { spec: BinSpec, counts: Vec<usize> },
    /// No value in the group survived numeric coercion.
    NoData,
    /// Values exist but no valid bin geometry could be derived.
    Degenerate,
}

impl HistogramPlan {
    pub fn placeholder_text(&self) -> Option<&'static str> {
        match self {
            HistogramPlan::Bins { .. } => None,
            HistogramPlan::NoData => Some("no data"),
            HistogramPlan::Degenerate => Some("no valid bins for this window"),
        }
    }
}

/// Everything a renderer needs for one group's artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan {
    /// Sanitized, run-unique file stem.
    pub artifact_name: String,
    pub title: String,
    pub parameter_name: String,
    pub description: String,
    pub window: LimitWindow,
    pub scatter: ScatterPlan,
    pub histogram: HistogramPlan,
}

/// Consumer of chart plans. One call produces one artifact.
pub trait ReportSink: Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn render(&self, plan: &ChartPlan) -> Result<PathBuf, Self::Error>;
}

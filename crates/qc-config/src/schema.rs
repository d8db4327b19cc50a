//! Report configuration schema.

use std::path::PathBuf;

use qc_core::{AxisMode, BinMode, GroupingKey};
use serde::{Deserialize, Serialize};

/// One report run's policy: grouping, padding, binning, axis layout and
/// where artifacts go.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub grouping: GroupingKey,
    #[serde(default = "default_pad_fraction")]
    pub pad_fraction: f64,
    #[serde(default)]
    pub bins: BinMode,
    #[serde(default)]
    pub axis: AxisMode,
    /// Fraction of the window edge magnitude that out-of-window markers are
    /// pulled inward.
    #[serde(default = "default_marker_inset")]
    pub marker_inset: f64,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub chart: ChartDef,
    #[serde(default)]
    pub columns: ColumnAliases,
    #[serde(default)]
    pub filter: RunFilter,
    /// Render groups on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
}

fn default_pad_fraction() -> f64 {
    0.1
}

fn default_marker_inset() -> f64 {
    0.02
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("scatter_plots")
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            grouping: GroupingKey::Parameter,
            pad_fraction: default_pad_fraction(),
            bins: BinMode::ToleranceFraction { fraction: 1.0 / 20.0 },
            axis: AxisMode::RankedIndex,
            marker_inset: default_marker_inset(),
            output_dir: default_output_dir(),
            chart: ChartDef::default(),
            columns: ColumnAliases::default(),
            filter: RunFilter::default(),
            parallel: false,
        }
    }
}

impl ReportConfig {
    /// Scatter-only report layout: grouped by parameter and description,
    /// half-tolerance padding, 50 fixed bins, serial names on the axis.
    pub fn legacy() -> Self {
        Self {
            grouping: GroupingKey::ParameterDescription,
            pad_fraction: 0.5,
            bins: BinMode::FixedCount { count: 50 },
            axis: AxisMode::Categorical,
            ..Self::default()
        }
    }

    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Default => Self::default(),
            Preset::Legacy => Self::legacy(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    #[default]
    Default,
    Legacy,
}

/// Output image size in pixels (both panels together).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChartDef {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartDef {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 600,
        }
    }
}

/// Alternate header names accepted for each canonical column. The
/// canonical name itself is always accepted first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColumnAliases {
    pub serial_name: Vec<String>,
    pub parameter_name: Vec<String>,
    pub description: Vec<String>,
    pub value: Vec<String>,
    pub lower_limit: Vec<String>,
    pub upper_limit: Vec<String>,
    pub result: Vec<String>,
    pub test_id: Vec<String>,
    pub test_time: Vec<String>,
    pub comparator: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            serial_name: names(&["serial_num", "serial_number", "serial"]),
            parameter_name: names(&["param_name"]),
            description: names(&["desc"]),
            value: names(&["param_value_float"]),
            lower_limit: names(&["lower"]),
            upper_limit: names(&["upper"]),
            result: names(&["pon.result"]),
            test_id: names(&["pon.test_id"]),
            test_time: names(&["test_start_time", "start_time"]),
            comparator: names(&["comp"]),
        }
    }
}

/// Row selection applied before grouping. Everything off by default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct RunFilter {
    /// Keep only rows whose result is `pass` or `true`.
    pub passing_only: bool,
    /// Keep only the N most recent test IDs per serial, by test time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_runs_per_serial: Option<usize>,
    /// Keep only rows with this comparator, e.g. `GELE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparator: Option<String>,
}

impl RunFilter {
    pub fn is_active(&self) -> bool {
        self.passing_only || self.max_runs_per_serial.is_some() || self.comparator.is_some()
    }
}

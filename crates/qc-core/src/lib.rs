//! qc-core: limit-aware aggregation and binning for QC chart reports.
//!
//! Contains:
//! - record (measurement rows + value coercion)
//! - window (padded display window from specification limits)
//! - group (partitioning records by parameter identity)
//! - classify (in/out-of-window classification + marker placement)
//! - bins (histogram edge derivation + counting)
//! - sanitize (artifact file names)
//! - plan (drawable chart primitives and the sink seam)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod bins;
pub mod classify;
pub mod error;
pub mod group;
pub mod numeric;
pub mod plan;
pub mod record;
pub mod sanitize;
pub mod window;

pub use bins::{BinMode, BinSpec, MAX_BINS, derive_bins, histogram_counts};
pub use classify::{AxisMode, ClassifiedGroup, ClassifiedSeries, Marker, MarkerDirection, classify};
pub use error::{QcError, QcResult};
pub use group::{GroupingKey, ParameterGroup, group_records};
pub use numeric::*;
pub use plan::{AxisTick, ChartPlan, HistogramPlan, ReportSink, ScatterPlan};
pub use record::{MeasurementRecord, coerce_value};
pub use sanitize::sanitize_filename;
pub use window::LimitWindow;

//! Histogram bin geometry derived from the specification tolerance.

use crate::numeric::{Real, Tolerances, linspace, nearly_equal};
use crate::window::LimitWindow;

/// Upper bound on derived bin counts; anything larger yields an empty spec.
pub const MAX_BINS: usize = 10_000;

/// How bin edges are derived from a window.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum BinMode {
    /// `count` equal bins over `[y_min, y_max]`.
    FixedCount { count: usize },
    /// Bins `fraction` of the tolerance wide, stretched to tile the window.
    ToleranceFraction { fraction: Real },
}

impl Default for BinMode {
    fn default() -> Self {
        BinMode::ToleranceFraction { fraction: 1.0 / 20.0 }
    }
}

/// Histogram edges. Either empty or at least two strictly increasing values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BinSpec {
    edges: Vec<Real>,
}

impl BinSpec {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Accept `edges` only if they satisfy the invariant.
    pub fn from_edges(edges: Vec<Real>) -> Self {
        let valid = edges.len() >= 2
            && edges.iter().all(|e| e.is_finite())
            && edges.windows(2).all(|w| w[0] < w[1]);
        if valid { Self { edges } } else { Self::empty() }
    }

    pub fn edges(&self) -> &[Real] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn bin_count(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }
}

/// Derive bin edges for `window` under `mode`.
///
/// Degenerate windows, zero tolerance in fraction mode and bin counts
/// beyond [`MAX_BINS`] give an empty spec; callers skip the histogram.
pub fn derive_bins(window: &LimitWindow, mode: BinMode) -> BinSpec {
    if window.is_degenerate() {
        return BinSpec::empty();
    }

    let num_bins = match mode {
        BinMode::FixedCount { count } => count,
        BinMode::ToleranceFraction { fraction } => {
            let bin_width = window.tolerance() * fraction;
            if !(bin_width > 0.0) || !bin_width.is_finite() {
                return BinSpec::empty();
            }
            let ratio = window.span() / bin_width;
            if !ratio.is_finite() || ratio > MAX_BINS as Real {
                tracing::warn!(ratio, "bin width too small for window, skipping histogram");
                return BinSpec::empty();
            }
            // 120 / 5 must stay 24 bins even if the division lands a hair above.
            let rounded = ratio.round();
            if nearly_equal(ratio, rounded, Tolerances::default()) {
                rounded as usize
            } else {
                ratio.ceil() as usize
            }
        }
    };

    if num_bins == 0 || num_bins > MAX_BINS {
        return BinSpec::empty();
    }
    BinSpec::from_edges(linspace(window.y_min, window.y_max, num_bins + 1))
}

/// Count `values` per bin. Values beyond the outer edges land in the
/// nearest edge bin; a value on an interior edge belongs to the bin above.
pub fn histogram_counts(spec: &BinSpec, values: &[Real]) -> Vec<usize> {
    let bins = spec.bin_count();
    let mut counts = vec![0usize; bins];
    if bins == 0 {
        return counts;
    }
    let edges = spec.edges();
    for &v in values.iter().filter(|v| v.is_finite()) {
        // Number of edges <= v, minus one, is the bin index.
        let idx = edges.partition_point(|&e| e <= v).saturating_sub(1);
        counts[idx.min(bins - 1)] += 1;
    }
    counts
}

//! Display window derived from specification limits.

use crate::error::{QcError, QcResult};
use crate::numeric::{Real, ensure_finite};

/// Padded display window around a parameter's specification limits.
///
/// Invariant: `y_min <= lower_limit <= upper_limit <= y_max`, strict at
/// both ends whenever the tolerance and the pad fraction are positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitWindow {
    pub lower_limit: Real,
    pub upper_limit: Real,
    pub y_min: Real,
    pub y_max: Real,
    /// The input limits arrived as `lower > upper` and were swapped.
    pub inverted: bool,
}

impl LimitWindow {
    /// Derive the window for `(lower_limit, upper_limit)` padded on each side
    /// by `pad_fraction` of the tolerance.
    ///
    /// Inverted limits are swapped with a warning. Equal limits give a
    /// zero-width window.
    pub fn derive(lower_limit: Real, upper_limit: Real, pad_fraction: Real) -> QcResult<Self> {
        let mut lower = ensure_finite(lower_limit, "lower_limit")?;
        let mut upper = ensure_finite(upper_limit, "upper_limit")?;
        let pad = ensure_finite(pad_fraction, "pad_fraction")?;
        if pad < 0.0 {
            return Err(QcError::InvalidArg {
                what: "pad_fraction must be non-negative",
            });
        }

        let inverted = lower > upper;
        if inverted {
            tracing::warn!(
                lower_limit,
                upper_limit,
                "inverted specification limits, swapping"
            );
            std::mem::swap(&mut lower, &mut upper);
        }

        let margin = (upper - lower) * pad;
        Ok(Self {
            lower_limit: lower,
            upper_limit: upper,
            y_min: lower - margin,
            y_max: upper + margin,
            inverted,
        })
    }

    /// Width of the specification band.
    pub fn tolerance(&self) -> Real {
        self.upper_limit - self.lower_limit
    }

    pub fn span(&self) -> Real {
        self.y_max - self.y_min
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.y_max > self.y_min)
    }

    pub fn contains(&self, v: Real) -> bool {
        v >= self.y_min && v <= self.y_max
    }
}

use crate::QcError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, QcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(QcError::NonFinite { what, value: v })
    }
}

/// `count` equally spaced points over `[start, end]`, both ends exact.
pub fn linspace(start: Real, end: Real, count: usize) -> Vec<Real> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = count - 1;
            let step = (end - start) / last as Real;
            (0..count)
                .map(|i| if i == last { end } else { start + step * i as Real })
                .collect()
        }
    }
}

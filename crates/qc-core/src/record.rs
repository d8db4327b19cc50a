//! Measurement rows.

use crate::numeric::Real;

/// One measurement of one parameter on one serialized unit.
///
/// `value` is NaN when the source cell was empty or not a number; such
/// values are excluded from classification and histograms.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    pub serial_name: String,
    pub parameter_name: String,
    pub description: String,
    pub value: Real,
    pub lower_limit: Real,
    pub upper_limit: Real,
}

impl MeasurementRecord {
    pub fn new(
        serial_name: impl Into<String>,
        parameter_name: impl Into<String>,
        description: impl Into<String>,
        value: Real,
        lower_limit: Real,
        upper_limit: Real,
    ) -> Self {
        Self {
            serial_name: serial_name.into(),
            parameter_name: parameter_name.into(),
            description: description.into(),
            value,
            lower_limit,
            upper_limit,
        }
    }

    /// The measured value, if it survived numeric coercion.
    pub fn numeric_value(&self) -> Option<Real> {
        self.value.is_finite().then_some(self.value)
    }
}

/// Coerce a raw cell to a number. Empty, non-numeric and non-finite cells
/// become NaN.
pub fn coerce_value(cell: &str) -> Real {
    match cell.trim().parse::<Real>() {
        Ok(v) if v.is_finite() => v,
        _ => Real::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_accepts_numbers_with_whitespace() {
        assert_eq!(coerce_value(" 12.5 "), 12.5);
        assert_eq!(coerce_value("-3e2"), -300.0);
    }

    #[test]
    fn coerce_rejects_text_and_blanks() {
        assert!(coerce_value("").is_nan());
        assert!(coerce_value("FAIL").is_nan());
        assert!(coerce_value("inf").is_nan());
        assert!(coerce_value("NaN").is_nan());
    }

    #[test]
    fn numeric_value_filters_nan() {
        let rec = MeasurementRecord::new("SN1", "vdd", "Supply", Real::NAN, 0.0, 1.0);
        assert_eq!(rec.numeric_value(), None);
        let rec = MeasurementRecord { value: 0.5, ..rec };
        assert_eq!(rec.numeric_value(), Some(0.5));
    }
}

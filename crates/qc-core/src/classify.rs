//! In-window / out-of-window classification per unit.

use std::collections::HashMap;

use crate::group::ParameterGroup;
use crate::numeric::Real;
use crate::window::LimitWindow;

/// How units are laid out along the scatter x-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AxisMode {
    /// Serial names as tick labels.
    Categorical,
    /// `"{rank}: {serial}"` tick labels.
    #[default]
    RankedIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerDirection {
    Above,
    Below,
}

impl MarkerDirection {
    pub fn glyph(self) -> &'static str {
        match self {
            MarkerDirection::Above => "^",
            MarkerDirection::Below => "v",
        }
    }
}

/// Out-of-window annotation. Sits at a fixed inset from the window edge,
/// never at the measured value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub x: Real,
    pub y: Real,
    pub direction: MarkerDirection,
}

/// Classification of one unit's values within a group.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedSeries {
    pub serial_name: String,
    pub x: Real,
    pub label: String,
    pub in_bounds: Vec<Real>,
    pub out_of_bounds_above: usize,
    pub out_of_bounds_below: usize,
    /// Values dropped by numeric coercion.
    pub missing: usize,
}

impl ClassifiedSeries {
    fn new(serial_name: &str) -> Self {
        Self {
            serial_name: serial_name.to_string(),
            x: 0.0,
            label: String::new(),
            in_bounds: Vec::new(),
            out_of_bounds_above: 0,
            out_of_bounds_below: 0,
            missing: 0,
        }
    }

    pub fn classified_count(&self) -> usize {
        self.in_bounds.len() + self.out_of_bounds_above + self.out_of_bounds_below
    }
}

/// Classified units of a group, ordered by x-position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassifiedGroup {
    pub axis: AxisMode,
    pub series: Vec<ClassifiedSeries>,
}

impl ClassifiedGroup {
    pub fn get(&self, serial_name: &str) -> Option<&ClassifiedSeries> {
        self.series.iter().find(|s| s.serial_name == serial_name)
    }

    pub fn unit_count(&self) -> usize {
        self.series.len()
    }

    /// Scatter points `(x, value)` for every in-window value.
    pub fn points(&self) -> Vec<(Real, Real)> {
        self.series
            .iter()
            .flat_map(|s| s.in_bounds.iter().map(move |&v| (s.x, v)))
            .collect()
    }

    /// One marker per out-of-window value. `inset` is the fraction of the
    /// edge magnitude the marker is pulled inward (0.02 puts an "above"
    /// marker at 98% of a positive `y_max`).
    pub fn markers(&self, window: &LimitWindow, inset: Real) -> Vec<Marker> {
        let above_y = window.y_max - edge_offset(window.y_max, window.span(), inset);
        let below_y = window.y_min + edge_offset(window.y_min, window.span(), inset);

        let mut markers = Vec::new();
        for s in &self.series {
            markers.extend((0..s.out_of_bounds_above).map(|_| Marker {
                x: s.x,
                y: above_y,
                direction: MarkerDirection::Above,
            }));
            markers.extend((0..s.out_of_bounds_below).map(|_| Marker {
                x: s.x,
                y: below_y,
                direction: MarkerDirection::Below,
            }));
        }
        markers
    }

    /// X-axis extent with half a slot of margin on each side.
    pub fn x_range(&self) -> (Real, Real) {
        let n = self.series.len().max(1) as Real;
        (-0.5, n - 0.5)
    }

    pub fn total_in_bounds(&self) -> usize {
        self.series.iter().map(|s| s.in_bounds.len()).sum()
    }

    pub fn total_above(&self) -> usize {
        self.series.iter().map(|s| s.out_of_bounds_above).sum()
    }

    pub fn total_below(&self) -> usize {
        self.series.iter().map(|s| s.out_of_bounds_below).sum()
    }
}

// Inward distance from a window edge. Relative to the edge value when that
// stays within half the window, otherwise relative to the span.
fn edge_offset(edge: Real, span: Real, inset: Real) -> Real {
    let relative = edge.abs() * inset;
    if relative > 0.0 && relative <= span * 0.5 {
        relative
    } else {
        span * inset
    }
}

/// Split each unit's values into in-window values and above/below counts.
pub fn classify(group: &ParameterGroup<'_>, window: &LimitWindow, axis: AxisMode) -> ClassifiedGroup {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut series: Vec<ClassifiedSeries> = Vec::new();

    for record in &group.records {
        let slot = *index
            .entry(record.serial_name.as_str())
            .or_insert_with(|| {
                series.push(ClassifiedSeries::new(&record.serial_name));
                series.len() - 1
            });
        let entry = &mut series[slot];

        match record.numeric_value() {
            None => entry.missing += 1,
            Some(v) if v > window.y_max => entry.out_of_bounds_above += 1,
            Some(v) if v < window.y_min => entry.out_of_bounds_below += 1,
            Some(v) => entry.in_bounds.push(v),
        }
    }

    // Units sit at their rank among the sorted serial names in both modes.
    series.sort_by(|a, b| a.serial_name.cmp(&b.serial_name));
    for (rank, s) in series.iter_mut().enumerate() {
        s.x = rank as Real;
        s.label = match axis {
            AxisMode::Categorical => s.serial_name.clone(),
            AxisMode::RankedIndex => format!("{rank}: {}", s.serial_name),
        };
    }

    ClassifiedGroup { axis, series }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{GroupingKey, group_records};
    use crate::record::MeasurementRecord;
    use proptest::prelude::*;

    fn records(rows: &[(&str, Real)], lo: Real, hi: Real) -> Vec<MeasurementRecord> {
        rows.iter()
            .map(|&(serial, v)| MeasurementRecord::new(serial, "p", "d", v, lo, hi))
            .collect()
    }

    #[test]
    fn classifies_against_padded_window() {
        let recs = records(&[("SN1", 25.0), ("SN1", 15.0), ("SN1", 5.0)], 10.0, 20.0);
        let groups = group_records(&recs, GroupingKey::Parameter);
        let window = LimitWindow::derive(10.0, 20.0, 0.1).unwrap();
        let classified = classify(&groups[0], &window, AxisMode::RankedIndex);

        let sn1 = classified.get("SN1").unwrap();
        assert_eq!(sn1.in_bounds, vec![15.0]);
        assert_eq!(sn1.out_of_bounds_above, 1);
        assert_eq!(sn1.out_of_bounds_below, 1);
    }

    #[test]
    fn window_edges_are_inclusive() {
        let recs = records(&[("A", 9.0), ("A", 21.0)], 10.0, 20.0);
        let groups = group_records(&recs, GroupingKey::Parameter);
        let window = LimitWindow::derive(10.0, 20.0, 0.1).unwrap();
        let classified = classify(&groups[0], &window, AxisMode::Categorical);
        assert_eq!(classified.get("A").unwrap().in_bounds, vec![9.0, 21.0]);
    }

    #[test]
    fn non_numeric_values_are_not_counted() {
        let recs = records(&[("A", Real::NAN), ("A", Real::NAN)], 0.0, 1.0);
        let groups = group_records(&recs, GroupingKey::Parameter);
        let window = LimitWindow::derive(0.0, 1.0, 0.1).unwrap();
        let classified = classify(&groups[0], &window, AxisMode::RankedIndex);

        let a = classified.get("A").unwrap();
        assert_eq!(a.classified_count(), 0);
        assert_eq!(a.missing, 2);
        assert!(classified.points().is_empty());
        assert!(classified.markers(&window, 0.02).is_empty());
    }

    #[test]
    fn ranked_index_sorts_serials() {
        let recs = records(&[("SN3", 1.0), ("SN1", 1.0), ("SN2", 1.0)], 0.0, 2.0);
        let groups = group_records(&recs, GroupingKey::Parameter);
        let window = LimitWindow::derive(0.0, 2.0, 0.1).unwrap();
        let classified = classify(&groups[0], &window, AxisMode::RankedIndex);

        let order: Vec<_> = classified.series.iter().map(|s| s.serial_name.as_str()).collect();
        assert_eq!(order, vec!["SN1", "SN2", "SN3"]);
        assert_eq!(classified.get("SN3").unwrap().x, 2.0);
        assert_eq!(classified.get("SN3").unwrap().label, "2: SN3");
    }

    #[test]
    fn categorical_orders_units_by_serial() {
        let recs = records(&[("SN3", 1.0), ("SN1", 1.0), ("SN3", 1.5)], 0.0, 2.0);
        let groups = group_records(&recs, GroupingKey::Parameter);
        let window = LimitWindow::derive(0.0, 2.0, 0.1).unwrap();
        let classified = classify(&groups[0], &window, AxisMode::Categorical);

        let placed: Vec<_> = classified
            .series
            .iter()
            .map(|s| (s.serial_name.as_str(), s.x, s.label.as_str()))
            .collect();
        assert_eq!(placed, vec![("SN1", 0.0, "SN1"), ("SN3", 1.0, "SN3")]);
        assert_eq!(classified.points(), vec![(0.0, 1.0), (1.0, 1.0), (1.0, 1.5)]);
    }

    #[test]
    fn axis_modes_share_positions_and_keep_serials_visible() {
        let recs = records(&[("SN3", 1.0), ("SN1", 1.0)], 0.0, 2.0);
        let groups = group_records(&recs, GroupingKey::Parameter);
        let window = LimitWindow::derive(0.0, 2.0, 0.1).unwrap();
        let categorical = classify(&groups[0], &window, AxisMode::Categorical);
        let ranked = classify(&groups[0], &window, AxisMode::RankedIndex);

        for (c, r) in categorical.series.iter().zip(&ranked.series) {
            assert_eq!(c.x, r.x);
            assert!(r.label.ends_with(&c.serial_name));
        }
        assert_eq!(ranked.series[0].label, "0: SN1");
    }

    #[test]
    fn markers_stack_at_fixed_inset() {
        let recs = records(&[("A", 100.0), ("A", 250.0), ("B", -3.0)], 10.0, 20.0);
        let groups = group_records(&recs, GroupingKey::Parameter);
        let window = LimitWindow::derive(10.0, 20.0, 0.1).unwrap();
        let classified = classify(&groups[0], &window, AxisMode::RankedIndex);
        let markers = classified.markers(&window, 0.02);

        assert_eq!(markers.len(), 3);
        let above: Vec<_> = markers
            .iter()
            .filter(|m| m.direction == MarkerDirection::Above)
            .collect();
        assert_eq!(above.len(), 2);
        assert!(above.iter().all(|m| m.x == 0.0 && (m.y - 21.0 * 0.98).abs() < 1e-12));

        let below = markers
            .iter()
            .find(|m| m.direction == MarkerDirection::Below)
            .unwrap();
        assert_eq!(below.x, 1.0);
        assert!((below.y - 9.0 * 1.02).abs() < 1e-12);
    }

    #[test]
    fn markers_stay_inside_negative_windows() {
        let window = LimitWindow::derive(-20.0, -10.0, 0.1).unwrap();
        let recs = records(&[("A", 0.0), ("A", -100.0)], -20.0, -10.0);
        let groups = group_records(&recs, GroupingKey::Parameter);
        let classified = classify(&groups[0], &window, AxisMode::RankedIndex);
        for m in classified.markers(&window, 0.02) {
            assert!(window.contains(m.y), "marker {m:?} outside {window:?}");
        }
    }

    proptest! {
        #[test]
        fn every_numeric_value_is_claimed_once(
            values in prop::collection::vec(prop_oneof![
                9 => -50.0_f64..50.0_f64,
                1 => Just(f64::NAN),
            ], 0..60),
            lo in -20.0_f64..0.0_f64,
            tol in 0.0_f64..20.0_f64,
            pad in 0.0_f64..1.0_f64,
        ) {
            let recs: Vec<MeasurementRecord> = values
                .iter()
                .enumerate()
                .map(|(i, &v)| MeasurementRecord::new(format!("SN{}", i % 4), "p", "d", v, lo, lo + tol))
                .collect();
            let groups = group_records(&recs, GroupingKey::Parameter);
            let window = LimitWindow::derive(lo, lo + tol, pad).unwrap();
            let numeric = values.iter().filter(|v| v.is_finite()).count();

            let classified: usize = groups
                .iter()
                .map(|g| {
                    let c = classify(g, &window, AxisMode::RankedIndex);
                    c.total_in_bounds() + c.total_above() + c.total_below()
                })
                .sum();
            prop_assert_eq!(classified, numeric);
        }
    }
}

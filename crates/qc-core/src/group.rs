//! Partitioning records by parameter identity.

use std::collections::HashMap;

use crate::numeric::Real;
use crate::record::MeasurementRecord;

/// Which record fields form a group's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GroupingKey {
    /// One group per parameter name.
    #[default]
    Parameter,
    /// One group per (parameter name, description) pair.
    ParameterDescription,
}

/// All records sharing a grouping key.
///
/// Description and limits are taken from the first record of the group;
/// later rows are not checked for agreement.
#[derive(Debug, Clone)]
pub struct ParameterGroup<'a> {
    pub parameter_name: &'a str,
    pub description: &'a str,
    pub lower_limit: Real,
    pub upper_limit: Real,
    pub records: Vec<&'a MeasurementRecord>,
}

impl<'a> ParameterGroup<'a> {
    fn start(first: &'a MeasurementRecord) -> Self {
        Self {
            parameter_name: &first.parameter_name,
            description: &first.description,
            lower_limit: first.lower_limit,
            upper_limit: first.upper_limit,
            records: vec![first],
        }
    }

    /// Human-readable identity used in titles and log lines.
    pub fn identity(&self) -> String {
        format!("{} - {}", self.parameter_name, self.description)
    }

    /// Values that survived numeric coercion, in input order.
    pub fn numeric_values(&self) -> Vec<Real> {
        self.records
            .iter()
            .filter_map(|r| r.numeric_value())
            .collect()
    }
}

/// Partition `records` by `key`, preserving first-seen order of the keys.
pub fn group_records(records: &[MeasurementRecord], key: GroupingKey) -> Vec<ParameterGroup<'_>> {
    let mut index: HashMap<(&str, Option<&str>), usize> = HashMap::new();
    let mut groups: Vec<ParameterGroup<'_>> = Vec::new();

    for record in records {
        let k = match key {
            GroupingKey::Parameter => (record.parameter_name.as_str(), None),
            GroupingKey::ParameterDescription => (
                record.parameter_name.as_str(),
                Some(record.description.as_str()),
            ),
        };
        match index.get(&k) {
            Some(&i) => groups[i].records.push(record),
            None => {
                index.insert(k, groups.len());
                groups.push(ParameterGroup::start(record));
            }
        }
    }

    groups
}

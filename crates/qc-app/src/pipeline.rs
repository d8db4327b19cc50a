//! Group → plan → sink, with per-group failure containment.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

use qc_config::ReportConfig;
use qc_core::{
    AxisMode, AxisTick, ChartPlan, HistogramPlan, LimitWindow, MeasurementRecord, ParameterGroup,
    QcResult, ReportSink, ScatterPlan, classify, derive_bins, group_records, histogram_counts,
    sanitize_filename,
};
use rayon::prelude::*;

/// What happened to one group.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupStatus {
    Rendered { path: PathBuf },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupOutcome {
    pub identity: String,
    pub artifact_name: String,
    pub record_count: usize,
    /// Limits arrived inverted and were swapped.
    pub inverted: bool,
    /// No value in the group was numeric.
    pub no_data: bool,
    pub status: GroupStatus,
}

impl GroupOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self.status, GroupStatus::Rendered { .. })
    }
}

/// Outcomes in input group order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSummary {
    pub groups: Vec<GroupOutcome>,
    pub elapsed_s: f64,
}

impl ReportSummary {
    pub fn rendered(&self) -> usize {
        self.groups.iter().filter(|g| g.is_rendered()).count()
    }

    pub fn failed(&self) -> usize {
        self.groups.len() - self.rendered()
    }

    pub fn inverted(&self) -> usize {
        self.groups.iter().filter(|g| g.inverted).count()
    }

    pub fn no_data(&self) -> usize {
        self.groups.iter().filter(|g| g.no_data).count()
    }
}

/// Artifact stems for `groups`: sanitized `"{parameter}_{description}"`,
/// `parameter_{n}` when nothing survives sanitization, and a `_{k}` suffix
/// on repeats so every stem is unique within the run.
pub fn assign_artifact_names(groups: &[ParameterGroup<'_>]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    groups
        .iter()
        .enumerate()
        .map(|(n, group)| {
            let mut base = sanitize_filename(&format!(
                "{}_{}",
                group.parameter_name, group.description
            ));
            if base.is_empty() {
                base = format!("parameter_{n}");
            }
            let mut name = base.clone();
            let mut k = 2;
            while taken.contains(&name) {
                name = format!("{base}_{k}");
                k += 1;
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}

/// Build the drawable plan for one group.
pub fn plan_group(
    group: &ParameterGroup<'_>,
    artifact_name: &str,
    config: &ReportConfig,
) -> QcResult<ChartPlan> {
    let window = LimitWindow::derive(group.lower_limit, group.upper_limit, config.pad_fraction)?;
    let classified = classify(group, &window, config.axis);

    let values = group.numeric_values();
    let histogram = if values.is_empty() {
        HistogramPlan::NoData
    } else {
        let spec = derive_bins(&window, config.bins);
        if spec.is_empty() {
            HistogramPlan::Degenerate
        } else {
            let counts = histogram_counts(&spec, &values);
            HistogramPlan::Bins { spec, counts }
        }
    };

    let ticks = classified
        .series
        .iter()
        .map(|s| AxisTick {
            x: s.x,
            label: s.label.clone(),
        })
        .collect();
    let x_label = match config.axis {
        AxisMode::Categorical => "Serial",
        AxisMode::RankedIndex => "Unit (rank: serial)",
    };

    Ok(ChartPlan {
        artifact_name: artifact_name.to_string(),
        title: group.identity(),
        parameter_name: group.parameter_name.to_string(),
        description: group.description.to_string(),
        window,
        scatter: ScatterPlan {
            x_range: classified.x_range(),
            points: classified.points(),
            markers: classified.markers(&window, config.marker_inset),
            ticks,
            x_label: x_label.to_string(),
        },
        histogram,
    })
}

/// Group `records`, plan every group and hand each plan to `sink`.
///
/// A failing group is logged and recorded; the rest of the batch still runs.
pub fn run_report<S: ReportSink>(
    records: &[MeasurementRecord],
    config: &ReportConfig,
    sink: &S,
) -> ReportSummary {
    let start = Instant::now();
    let groups = group_records(records, config.grouping);
    let names = assign_artifact_names(&groups);
    let jobs: Vec<_> = groups.iter().zip(names.iter()).collect();

    tracing::info!(
        groups = jobs.len(),
        records = records.len(),
        parallel = config.parallel,
        "generating report"
    );

    let outcomes: Vec<GroupOutcome> = if config.parallel {
        jobs.par_iter()
            .map(|(group, name)| process_group(group, name, config, sink))
            .collect()
    } else {
        jobs.iter()
            .map(|(group, name)| process_group(group, name, config, sink))
            .collect()
    };

    let summary = ReportSummary {
        groups: outcomes,
        elapsed_s: start.elapsed().as_secs_f64(),
    };
    tracing::info!(
        rendered = summary.rendered(),
        failed = summary.failed(),
        inverted = summary.inverted(),
        no_data = summary.no_data(),
        elapsed_s = summary.elapsed_s,
        "report finished"
    );
    summary
}

fn process_group<S: ReportSink>(
    group: &ParameterGroup<'_>,
    artifact_name: &str,
    config: &ReportConfig,
    sink: &S,
) -> GroupOutcome {
    let identity = group.identity();
    let mut outcome = GroupOutcome {
        identity: identity.clone(),
        artifact_name: artifact_name.to_string(),
        record_count: group.records.len(),
        inverted: false,
        no_data: false,
        status: GroupStatus::Failed {
            reason: String::new(),
        },
    };

    let plan = match plan_group(group, artifact_name, config) {
        Ok(plan) => plan,
        Err(e) => {
            tracing::warn!(group = %identity, error = %e, "skipping group");
            outcome.status = GroupStatus::Failed {
                reason: e.to_string(),
            };
            return outcome;
        }
    };
    outcome.inverted = plan.window.inverted;
    outcome.no_data = plan.histogram == HistogramPlan::NoData;

    outcome.status = match sink.render(&plan) {
        Ok(path) => GroupStatus::Rendered { path },
        Err(e) => {
            tracing::warn!(group = %identity, error = %e, "failed to render group");
            GroupStatus::Failed {
                reason: e.to_string(),
            }
        }
    };
    outcome
}

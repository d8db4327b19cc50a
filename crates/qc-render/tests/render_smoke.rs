//! Smoke test: draw one report PNG per histogram variant.

use std::path::PathBuf;

use qc_core::*;
use qc_render::{PlottersRenderer, RenderError};

fn plan(name: &str, histogram: HistogramPlan) -> ChartPlan {
    let window = LimitWindow::derive(10.0, 20.0, 0.1).unwrap();
    ChartPlan {
        artifact_name: name.to_string(),
        title: "vout - Output voltage".to_string(),
        parameter_name: "vout".to_string(),
        description: "Output voltage".to_string(),
        window,
        scatter: ScatterPlan {
            x_range: (-0.5, 1.5),
            points: vec![(0.0, 15.0), (1.0, 12.5)],
            markers: vec![
                Marker {
                    x: 0.0,
                    y: 21.0 * 0.98,
                    direction: MarkerDirection::Above,
                },
                Marker {
                    x: 1.0,
                    y: 9.0 * 1.02,
                    direction: MarkerDirection::Below,
                },
            ],
            ticks: vec![
                AxisTick {
                    x: 0.0,
                    label: "SN001".to_string(),
                },
                AxisTick {
                    x: 1.0,
                    label: "SN002".to_string(),
                },
            ],
            x_label: "Serial".to_string(),
        },
        histogram,
    }
}

fn out_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn renders_bins_and_placeholders() {
    let dir = out_dir("qc_render_smoke");
    let renderer = PlottersRenderer::new(dir.clone(), 800, 300);

    let spec = BinSpec::from_edges(vec![9.0, 13.0, 17.0, 21.0]);
    let counts = histogram_counts(&spec, &[12.5, 15.0]);
    let plans = [
        plan("vout_bins", HistogramPlan::Bins { spec, counts }),
        plan("vout_no_data", HistogramPlan::NoData),
    ];

    for plan in &plans {
        match qc_core::ReportSink::render(&renderer, plan) {
            Ok(path) => {
                assert_eq!(path, dir.join(format!("{}.png", plan.artifact_name)));
                assert!(path.exists());
            }
            // Headless machines without system fonts cannot draw text.
            Err(RenderError::Drawing(msg)) | Err(RenderError::Panicked(msg)) => {
                eprintln!("Skipping render smoke test: {msg}");
                return;
            }
            Err(e) => panic!("unexpected render error: {e}"),
        }
    }
}

#[test]
fn missing_output_dir_is_reported() {
    let dir = std::env::temp_dir().join("qc_render_missing_dir_never_created");
    let _ = std::fs::remove_dir_all(&dir);
    let renderer = PlottersRenderer::new(dir, 400, 200);

    let err = qc_core::ReportSink::render(&renderer, &plan("x", HistogramPlan::Degenerate)).unwrap_err();
    assert!(matches!(err, RenderError::MissingOutputDir(_)));
}

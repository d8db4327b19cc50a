//! Scatter + histogram layout for one parameter.

use std::error::Error;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use qc_core::{ChartPlan, HistogramPlan, MarkerDirection, Real};

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const FONT: &str = "sans-serif";

/// Draw `plan` to a PNG at `path`: scatter on the left, histogram on the right.
pub fn draw_report(plan: &ChartPlan, path: &Path, size: (u32, u32)) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(&plan.title, (FONT, 22))?;

    let panels = root.split_evenly((1, 2));
    draw_scatter(&panels[0], plan)?;
    draw_histogram(&panels[1], plan)?;

    root.present()?;
    Ok(())
}

/// Y range to draw; a zero-width window is widened around its value.
pub fn display_range(y_min: Real, y_max: Real) -> (Real, Real) {
    if y_max > y_min {
        return (y_min, y_max);
    }
    let half = if y_min != 0.0 { y_min.abs() * 0.05 } else { 1.0 };
    (y_min - half, y_min + half)
}

fn draw_scatter(area: &Area<'_>, plan: &ChartPlan) -> Result<(), Box<dyn Error>> {
    let window = &plan.window;
    let scatter = &plan.scatter;
    let (x_lo, x_hi) = scatter.x_range;
    let (y_lo, y_hi) = display_range(window.y_min, window.y_max);

    let mut chart = ChartBuilder::on(area)
        .caption("Values per unit", (FONT, 16))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    // Ticks sit on integer slots; anything plotters asks for in between is blank.
    let tick_label = |x: &Real| -> String {
        let slot = x.round();
        if (x - slot).abs() > 1e-6 {
            return String::new();
        }
        scatter
            .ticks
            .iter()
            .find(|t| t.x == slot)
            .map(|t| t.label.clone())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .x_labels(scatter.ticks.len().clamp(2, 40))
        .x_label_formatter(&tick_label)
        .x_desc(scatter.x_label.as_str())
        .y_desc("Value")
        .draw()?;

    for limit in [window.lower_limit, window.upper_limit] {
        chart.draw_series(LineSeries::new(
            vec![(x_lo, limit), (x_hi, limit)],
            RED.stroke_width(2),
        ))?;
    }

    chart.draw_series(
        scatter
            .points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 4, BLUE.mix(0.7).filled())),
    )?;

    let glyph_style = |direction: MarkerDirection| {
        let vpos = match direction {
            MarkerDirection::Above => VPos::Bottom,
            MarkerDirection::Below => VPos::Top,
        };
        (FONT, 16)
            .into_font()
            .color(&BLUE)
            .pos(Pos::new(HPos::Center, vpos))
    };
    chart.draw_series(scatter.markers.iter().map(|m| {
        Text::new(m.direction.glyph(), (m.x, m.y), glyph_style(m.direction))
    }))?;

    Ok(())
}

fn draw_histogram(area: &Area<'_>, plan: &ChartPlan) -> Result<(), Box<dyn Error>> {
    let (spec, counts) = match &plan.histogram {
        HistogramPlan::Bins { spec, counts } => (spec, counts),
        placeholder => {
            let text = placeholder.placeholder_text().unwrap_or("no data");
            let (w, h) = area.dim_in_pixel();
            let style = (FONT, 20)
                .into_font()
                .color(&BLACK.mix(0.6))
                .pos(Pos::new(HPos::Center, VPos::Center));
            area.draw_text(text, &style, (w as i32 / 2, h as i32 / 2))?;
            return Ok(());
        }
    };

    let edges = spec.edges();
    let (x_lo, x_hi) = (edges[0], edges[edges.len() - 1]);
    let y_top = counts.iter().copied().max().unwrap_or(0).max(1) as Real * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Distribution", (FONT, 16))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, 0.0..y_top)?;

    chart.configure_mesh().x_desc("Value").y_desc("Count").draw()?;

    chart.draw_series(edges.windows(2).zip(counts.iter()).map(|(edge, &count)| {
        Rectangle::new([(edge[0], 0.0), (edge[1], count as Real)], BLUE.mix(0.6).filled())
    }))?;

    for limit in [plan.window.lower_limit, plan.window.upper_limit] {
        chart.draw_series(LineSeries::new(
            vec![(limit, 0.0), (limit, y_top)],
            RED.stroke_width(2),
        ))?;
    }

    Ok(())
}

//! PNG figures.

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use st_ident::StepResponseTrace;

use crate::error::{AppError, AppResult};
use crate::pipeline::MethodOutcome;

type DrawResult = Result<(), Box<dyn Error>>;

struct Series<'a> {
    label: &'a str,
    points: Vec<(f64, f64)>,
    color: RGBColor,
}

/// Raw step test: input step and measured output against time.
pub fn render_trace(path: &Path, trace: &StepResponseTrace, size: (u32, u32)) -> AppResult<()> {
    draw_trace(path, trace, size).map_err(|e| plot_error(path, e))
}

/// Two panels: the closed-loop step response on the left, the same
/// response over the measured output on the right.
pub fn render_comparison(
    path: &Path,
    trace: &StepResponseTrace,
    outcome: &MethodOutcome,
    size: (u32, u32),
) -> AppResult<()> {
    draw_comparison(path, trace, outcome, size).map_err(|e| plot_error(path, e))
}

fn plot_error(path: &Path, err: Box<dyn Error>) -> AppError {
    AppError::Plot {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn draw_trace(path: &Path, trace: &StepResponseTrace, size: (u32, u32)) -> DrawResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    draw_panel(
        &root,
        "Step Test",
        "Amplitude",
        &[
            Series {
                label: "input step",
                points: trace.input_series(),
                color: BLUE,
            },
            Series {
                label: "measured output",
                points: trace.output_series(),
                color: RED,
            },
        ],
    )?;
    root.present()?;
    Ok(())
}

fn draw_comparison(
    path: &Path,
    trace: &StepResponseTrace,
    outcome: &MethodOutcome,
    size: (u32, u32),
) -> DrawResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));

    let name = outcome.tuning.method.label();
    let response = outcome.response.series();

    draw_panel(
        &panels[0],
        &format!("Closed-Loop Step Response ({name})"),
        "Step response",
        &[Series {
            label: "step response",
            points: response.clone(),
            color: BLUE,
        }],
    )?;
    draw_panel(
        &panels[1],
        &format!("Measured Data vs Closed Loop ({name})"),
        "Output",
        &[
            Series {
                label: "measured",
                points: trace.output_series(),
                color: RED,
            },
            Series {
                label: "closed loop",
                points: response,
                color: GREEN,
            },
        ],
    )?;

    root.present()?;
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    caption: &str,
    y_desc: &str,
    series: &[Series<'_>],
) -> DrawResult {
    let x_range = padded_range(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)), 0.0);
    let y_range = padded_range(series.iter().flat_map(|s| s.points.iter().map(|p| p.1)), 0.05);

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Time [s]")
        .y_desc(y_desc)
        .draw()?;

    for s in series {
        let color = s.color;
        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), color.stroke_width(2)))?
            .label(s.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/// Axis range covering every finite value, widened by `pad` of the span.
/// Degenerate spans get a unit-scale margin so the axis never collapses.
fn padded_range(values: impl Iterator<Item = f64>, pad: f64) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return 0.0..1.0;
    }
    let span = hi - lo;
    if span < 1e-12 {
        let half = lo.abs().max(1.0) * 0.5;
        return (lo - half)..(hi + half);
    }
    (lo - span * pad)..(hi + span * pad)
}

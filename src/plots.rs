use std::ops::Range;
use std::path::Path;

use itertools::Itertools;
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::regression::{CostSurface, Theta};

/// Stride between wireframe lines of the cost surface.
const SURFACE_STRIDE: usize = 8;

const UNIT_RANGE: Range<f64> = 0.0..1.0;

pub fn render_svg<F>(path: impl AsRef<Path>, size: (u32, u32), draw: F) -> Result<()>
where
    F: FnOnce(&DrawingArea<SVGBackend, Shift>) -> Result<()>,
{
    let path = path.as_ref();
    let drawing_area = SVGBackend::new(path, size).into_drawing_area();

    draw(&drawing_area)?;
    drawing_area.present()?;

    info!("wrote {}", path.display());

    Ok(())
}

/// Training data with the line of `theta` on top, and the cost surface with
/// `theta` marked, stacked vertically.
pub fn plot_iteration<DB>(
    iteration: usize,
    data: &Dataset,
    theta: Theta,
    surface: &CostSurface,
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB: DrawingBackend,
{
    drawing_area.fill(&WHITE)?;

    let drawing_area =
        drawing_area.titled(&format!("iteration number : {iteration}"), ("Arial", 20))?;

    if let [upper, lower] = drawing_area.split_evenly((2, 1)).as_slice() {
        plot_fit(data, theta, "Plotting our hypothesis over training data", upper)?;
        plot_cost_surface(surface, theta, crate::regression::cost(theta, data), lower)?;
    }

    Ok(())
}

pub fn plot_fit<DB>(
    data: &Dataset,
    theta: Theta,
    caption: &str,
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB: DrawingBackend,
{
    drawing_area.fill(&WHITE)?;

    let points: Vec<(f64, f64)> = data.points().filter(|&point| is_finite(point)).collect();

    // diverged parameters leave no line to draw
    let line: Vec<(f64, f64)> = finite_bounds(points.iter().map(|&(x, _)| x))
        .map(|(min, max)| [(min, theta.hypothesis(min)), (max, theta.hypothesis(max))])
        .filter(|line| line.iter().all(|&point| is_finite(point)))
        .map(Vec::from)
        .unwrap_or_default();

    let x_range = axis_range(points.iter().map(|&(x, _)| x));
    let y_range = axis_range(points.iter().chain(&line).map(|&(_, y)| y));

    let mut chart_context = ChartBuilder::on(drawing_area)
        .caption(caption, ("Arial", 20))
        .set_all_label_area_size(50)
        .margin(20)
        .build_cartesian_2d(x_range, y_range)?;

    chart_context
        .configure_mesh()
        .x_labels(10)
        .x_desc("x values")
        .y_labels(10)
        .y_desc("y values")
        .draw()?;

    chart_context
        .draw_series(points.into_iter().map(|point| Circle::new(point, 3, CYAN.filled())))?
        .label("data points")
        .legend(|(x, y)| Circle::new((x, y), 3, CYAN.filled()));

    chart_context
        .draw_series(LineSeries::new(line, &BLACK))?
        .label("hypothesis")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

    chart_context
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE)
        .draw()?;

    Ok(())
}

/// Wireframe of `surface` in (θ₀, cost, θ₁) space with a marker at `theta`.
pub fn plot_cost_surface<DB>(
    surface: &CostSurface,
    theta: Theta,
    cost: f64,
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB: DrawingBackend,
{
    drawing_area.fill(&WHITE)?;

    let theta0_range = grid_range(&surface.theta0);
    let theta1_range = grid_range(&surface.theta1);
    let max_cost = if cost.is_finite() {
        surface.max_cost().max(cost)
    } else {
        surface.max_cost()
    };
    let cost_range = if max_cost > 0. { 0f64..max_cost } else { UNIT_RANGE };

    let mut chart_context = ChartBuilder::on(drawing_area)
        .caption("Cost Function (theta 0, cost, theta 1)", ("Arial", 20))
        .margin(20)
        .build_cartesian_3d(theta0_range.clone(), cost_range.clone(), theta1_range.clone())?;

    chart_context.with_projection(|mut pb| {
        pb.yaw = 0.17;
        pb.scale = 0.9;
        pb.into_matrix()
    });

    chart_context
        .configure_axes()
        .x_labels(5)
        .y_labels(5)
        .z_labels(5)
        .draw()?;

    let (rows, cols) = surface.cost.dim();

    for i in strided(rows) {
        chart_context.draw_series(LineSeries::new(
            (0..cols)
                .map(|j| (surface.theta0[j], surface.cost[[i, j]], surface.theta1[i]))
                .filter(|&(_, cost, _)| cost.is_finite()),
            BLUE.mix(0.3),
        ))?;
    }

    for j in strided(cols) {
        chart_context.draw_series(LineSeries::new(
            (0..rows)
                .map(|i| (surface.theta0[j], surface.cost[[i, j]], surface.theta1[i]))
                .filter(|&(_, cost, _)| cost.is_finite()),
            BLUE.mix(0.3),
        ))?;
    }

    let within = |range: &Range<f64>, value: f64| (range.start..=range.end).contains(&value);
    let on_chart = within(&theta0_range, theta.bias)
        && within(&theta1_range, theta.weight)
        && within(&cost_range, cost);

    if on_chart {
        chart_context.draw_series(std::iter::once(Circle::new(
            (theta.bias, cost, theta.weight),
            5,
            RED.filled(),
        )))?;
    }

    Ok(())
}

pub fn plot_predicted_vs_actual<DB>(
    data: &Dataset,
    theta: Theta,
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB: DrawingBackend,
{
    drawing_area.fill(&WHITE)?;

    let points: Vec<(f64, f64)> = data
        .points()
        .map(|(x, y)| (theta.hypothesis(x), y))
        .filter(|&point| is_finite(point))
        .collect();

    let predicted = axis_range(points.iter().map(|&(p, _)| p));
    let actual = axis_range(points.iter().map(|&(_, y)| y));

    let mut chart_context = ChartBuilder::on(drawing_area)
        .caption("Predicted vs Actual results", ("Arial", 20))
        .set_all_label_area_size(50)
        .margin(20)
        .build_cartesian_2d(predicted, actual)?;

    chart_context
        .configure_mesh()
        .x_labels(10)
        .x_desc("Predicted value")
        .y_labels(10)
        .y_desc("Actual value")
        .draw()?;

    chart_context.draw_series(
        points
            .into_iter()
            .map(|point| Circle::new(point, 3, CYAN.filled())),
    )?;

    Ok(())
}

pub fn plot_learning_curve<DB>(
    cost_history: &[f64],
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB: DrawingBackend,
{
    drawing_area.fill(&WHITE)?;

    let max_cost = finite_bounds(cost_history.iter().cloned())
        .map(|(_, max)| max)
        .filter(|&max| max > 0.)
        .unwrap_or(1.);
    let cost_ceiling = Some(max_cost * 1.05)
        .filter(|ceiling| ceiling.is_finite())
        .unwrap_or(max_cost);

    let mut chart_context = ChartBuilder::on(drawing_area)
        .caption("Learning Curve", ("Arial", 20))
        .set_all_label_area_size(70)
        .margin(20)
        .build_cartesian_2d(0..cost_history.len().max(1), 0f64..cost_ceiling)?;

    chart_context
        .configure_mesh()
        .x_labels(10)
        .x_desc("Number Of Iterations")
        .y_labels(10)
        .y_desc("Cost Function Value")
        .y_label_formatter(&|y| format!("{:.1e}", y))
        .draw()?;

    chart_context
        .draw_series(LineSeries::new(
            cost_history
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_finite())
                .map(|(i, &c)| (i, c)),
            &BLUE,
        ))?
        .label("Cost Function Curve")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart_context
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE)
        .draw()?;

    Ok(())
}

fn strided(len: usize) -> impl Iterator<Item = usize> {
    (0..len)
        .step_by(SURFACE_STRIDE)
        .chain((len > 0 && (len - 1) % SURFACE_STRIDE != 0).then(|| len - 1))
}

fn grid_range(axis: &ndarray::Array1<f64>) -> Range<f64> {
    match (axis.first(), axis.last()) {
        (Some(&start), Some(&end)) if start < end => start..end,
        (Some(&start), _) => start - 1.0..start + 1.0,
        _ => UNIT_RANGE,
    }
}

fn is_finite((x, y): (f64, f64)) -> bool {
    x.is_finite() && y.is_finite()
}

/// Smallest and largest finite value, NaN and infinities skipped.
fn finite_bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .minmax_by(f64::total_cmp)
        .into_option()
}

/// Padded chart axis over the finite `values`, the unit range when none are.
fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    finite_bounds(values)
        .map(|(min, max)| padded(min, max))
        .unwrap_or(UNIT_RANGE)
}

fn padded(min: f64, max: f64) -> Range<f64> {
    let span = max - min;
    let magnitude = min.abs().max(max.abs());

    // plotters steps its key points by a fraction of the span, which must
    // stay above the resolution of the bounds themselves
    let pad = if span > magnitude * 1e-9 {
        span * 0.05
    } else {
        (magnitude * 0.05).max(1.)
    };

    let range = min - pad..max + pad;

    if (range.end - range.start).is_finite() {
        range
    } else {
        UNIT_RANGE
    }
}

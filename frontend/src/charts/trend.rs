use plotters::coord::Shift;
use plotters::prelude::*;
use shared::ChartSeries;

use super::{ChartError, AREA_FILL, FONT_FAMILY, GRID_COLOR, LINE_COLOR, MUTED_TEXT_COLOR, TITLE_COLOR};
use crate::services::currency::{axis_dollars, dollars};

pub const TREND_TITLE: &str = "Monthly Spending Trend";

const POINT_RADIUS: u32 = 4;
/// How far from a point, in pixels, the pointer still counts as over it
const HIT_RADIUS: f64 = 12.0;
const NO_LINE: RGBAColor = RGBAColor(0, 0, 0, 0.0);

/// Data point positions on the surface, in surface pixels
#[derive(Debug, Clone, PartialEq)]
pub struct TrendGeometry {
    pub points: Vec<(i32, i32)>,
}

impl TrendGeometry {
    /// Index of the data point nearest to `(x, y)` within the hit radius
    pub fn point_near(&self, x: f64, y: f64) -> Option<usize> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, (px, py))| (i, (x - *px as f64).hypot(y - *py as f64)))
            .filter(|(_, distance)| *distance <= HIT_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

/// Tooltip text for one month
pub fn trend_tooltip(label: &str, value: f64) -> String {
    format!("{}\nExpenses: {}", label, dollars(value))
}

/// Axis label for an x position; only whole indices carry a month label
fn month_label(labels: &[String], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Upper bound of the y axis: headroom above the largest month, never empty
fn y_ceiling(series: &ChartSeries) -> f64 {
    (series.max_value() * 1.1).max(1.0)
}

/// Draw the monthly totals as a filled line chart with a zero-based `$` axis
pub fn draw_trend_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &ChartSeries,
) -> Result<TrendGeometry, ChartError> {
    let count = series.len();
    let x_range = -0.5..(count as f64 - 0.5);

    let mut chart = ChartBuilder::on(root)
        .caption(TREND_TITLE, (FONT_FAMILY, 16).into_font().color(&TITLE_COLOR))
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, 0.0..y_ceiling(series))?;

    let labels = &series.labels;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(&GRID_COLOR)
        .light_line_style(&NO_LINE)
        .x_labels(count.max(1))
        .y_labels(6)
        .x_label_formatter(&|x| month_label(labels, *x))
        .y_label_formatter(&|y| axis_dollars(*y))
        .label_style((FONT_FAMILY, 12).into_font().color(&MUTED_TEXT_COLOR))
        .axis_style(&RGBColor(230, 230, 230))
        .draw()?;

    let points: Vec<(f64, f64)> = series
        .data
        .iter()
        .enumerate()
        .map(|(i, value)| (i as f64, *value))
        .collect();

    chart.draw_series(AreaSeries::new(points.iter().copied(), 0.0, AREA_FILL.filled()))?;
    chart.draw_series(LineSeries::new(points.iter().copied(), LINE_COLOR.stroke_width(3)))?;

    // Draw individual points with a white ring for visibility
    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, POINT_RADIUS, LINE_COLOR.filled())),
    )?;
    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, POINT_RADIUS, WHITE.stroke_width(2))),
    )?;

    root.present()?;

    Ok(TrendGeometry {
        points: points.iter().map(|point| chart.backend_coord(point)).collect(),
    })
}

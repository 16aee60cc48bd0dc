use std::f64::consts::{PI, TAU};

use plotters::coord::Shift;
use plotters::prelude::*;
use shared::ChartSeries;

use super::{palette_for, ChartError, FONT_FAMILY, TITLE_COLOR};
use crate::services::currency::dollars;

pub const CATEGORY_TITLE: &str = "Spending by Category";

/// Share of the outer radius cut out of the middle
const DONUT_HOLE: f64 = 0.5;
const LEGEND_SWATCH: i32 = 12;
const LEGEND_ROW: i32 = 22;
/// Arc resolution: one vertex per this many radians
const ARC_STEP: f64 = PI / 90.0;

/// Angular extent of one category, clockwise from 12 o'clock
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentArc {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

/// Where the donut landed on the surface, in surface pixels
#[derive(Debug, Clone, PartialEq)]
pub struct DonutGeometry {
    pub center: (i32, i32),
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub segments: Vec<SegmentArc>,
}

impl DonutGeometry {
    /// Index of the category under the pixel `(x, y)`, if any
    pub fn segment_at(&self, x: f64, y: f64) -> Option<usize> {
        let dx = x - self.center.0 as f64;
        let dy = y - self.center.1 as f64;
        let distance = dx.hypot(dy);
        if distance < self.inner_radius || distance > self.outer_radius {
            return None;
        }

        let mut angle = dx.atan2(-dy);
        if angle < 0.0 {
            angle += TAU;
        }
        self.segments
            .iter()
            .find(|s| angle >= s.start && angle < s.end)
            .map(|s| s.index)
    }
}

/// Tooltip text for a category segment
pub fn category_tooltip(label: &str, value: f64) -> String {
    format!("{}: {}", label, dollars(value))
}

/// Split the full circle by each category's share of the positive total
pub fn segment_arcs(series: &ChartSeries) -> Vec<SegmentArc> {
    let total = series.positive_total();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = 0.0;
    let mut arcs: Vec<SegmentArc> = series
        .data
        .iter()
        .enumerate()
        .filter(|(_, value)| **value > 0.0)
        .map(|(index, value)| {
            let sweep = value / total * TAU;
            let arc = SegmentArc {
                index,
                start,
                end: start + sweep,
            };
            start += sweep;
            arc
        })
        .collect();

    // close the ring exactly so no angle falls through rounding
    if let Some(last) = arcs.last_mut() {
        last.end = TAU;
    }
    arcs
}

fn arc_point(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.sin()).round() as i32,
        center.1 - (radius * angle.cos()).round() as i32,
    )
}

/// Closed outline of a ring segment: outer arc forward, inner arc back
fn ring_segment(center: (i32, i32), outer: f64, inner: f64, arc: &SegmentArc) -> Vec<(i32, i32)> {
    let sweep = arc.end - arc.start;
    let steps = ((sweep / ARC_STEP).ceil() as usize).max(2);
    let angle_at = |i: usize| arc.start + sweep * i as f64 / steps as f64;

    let mut points: Vec<(i32, i32)> = (0..=steps).map(|i| arc_point(center, outer, angle_at(i))).collect();
    points.extend((0..=steps).rev().map(|i| arc_point(center, inner, angle_at(i))));
    points
}

/// Draw the category donut with a legend on the right.
///
/// Segments go clockwise from the top in series order, one palette color per
/// category, separated by white borders.
pub fn draw_category_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &ChartSeries,
) -> Result<DonutGeometry, ChartError> {
    let colors = palette_for(series.len().max(series.data.len()));
    let area = root.titled(CATEGORY_TITLE, (FONT_FAMILY, 16).into_font().color(&TITLE_COLOR))?;

    let (width, _) = area.dim_in_pixel();
    let (chart_area, legend_area) = area.split_horizontally((width as i32 * 2) / 3);

    let (chart_width, chart_height) = chart_area.dim_in_pixel();
    let local_center = ((chart_width / 2) as i32, (chart_height / 2) as i32);
    let outer_radius = (chart_width.min(chart_height) as f64 / 2.0 - 10.0).max(1.0);
    let inner_radius = outer_radius * DONUT_HOLE;

    let arcs = segment_arcs(series);
    for arc in &arcs {
        let outline = ring_segment(local_center, outer_radius, inner_radius, arc);
        chart_area.draw(&Polygon::new(outline.clone(), colors[arc.index].filled()))?;

        let mut border = outline;
        if let Some(first) = border.first().copied() {
            border.push(first);
        }
        chart_area.draw(&PathElement::new(border, WHITE.stroke_width(2)))?;
    }

    let legend_font = (FONT_FAMILY, 13).into_font().color(&TITLE_COLOR);
    for (i, label) in series.labels.iter().enumerate() {
        let top = 10 + i as i32 * LEGEND_ROW;
        legend_area.draw(&Rectangle::new(
            [(0, top), (LEGEND_SWATCH, top + LEGEND_SWATCH)],
            colors[i].filled(),
        ))?;
        legend_area.draw(&Text::new(label.clone(), (LEGEND_SWATCH + 8, top), legend_font.clone()))?;
    }

    root.present()?;

    let (base_x, base_y) = chart_area.get_base_pixel();
    Ok(DonutGeometry {
        center: (base_x + local_center.0, base_y + local_center.1),
        outer_radius,
        inner_radius,
        segments: arcs,
    })
}

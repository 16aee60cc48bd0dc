//! Dashboard chart drawing.
//!
//! Charts are drawn with `plotters` against any `DrawingBackend`; in the
//! browser that is a `plotters_canvas::CanvasBackend` over the page's canvas,
//! in tests an in-memory recorder. Each drawing routine returns the geometry
//! needed to hit-test hover positions for tooltips.

pub mod category;
pub mod palette;
pub mod placeholder;
pub mod registry;
pub mod trend;

#[cfg(test)]
pub(crate) mod test_backend;

use plotters::drawing::DrawingAreaErrorKind;
use plotters::style::{RGBAColor, RGBColor};
use shared::ChartSeries;
use thiserror::Error;

use crate::services::ApiError;

pub use category::{draw_category_chart, DonutGeometry};
pub use palette::palette_for;
pub use placeholder::draw_placeholder;
pub use registry::WidgetRegistry;
pub use trend::{draw_trend_chart, TrendGeometry};

pub const FONT_FAMILY: &str = "sans-serif";
pub const TITLE_COLOR: RGBColor = RGBColor(0x21, 0x21, 0x21);
pub const MUTED_TEXT_COLOR: RGBColor = RGBColor(0x75, 0x75, 0x75);
pub const LINE_COLOR: RGBColor = RGBColor(0x19, 0x76, 0xD2);
pub const AREA_FILL: RGBAColor = RGBAColor(25, 118, 210, 0.1);
pub const GRID_COLOR: RGBAColor = RGBAColor(0, 0, 0, 0.05);

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart surface has no 2d drawing context")]
    SurfaceUnavailable,
    #[error("drawing failed: {0}")]
    Drawing(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Drawing(e.to_string())
    }
}

/// The two dashboard charts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Category,
    Trend,
}

impl ChartKind {
    /// Element id of the canvas this chart draws on
    pub fn surface_id(&self) -> &'static str {
        match self {
            ChartKind::Category => "categoryChart",
            ChartKind::Trend => "trendChart",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            ChartKind::Category => "No expense data available for the selected period",
            ChartKind::Trend => "No expense trend data available",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            ChartKind::Category => "Error loading category data",
            ChartKind::Trend => "Error loading trend data",
        }
    }
}

/// What a chart surface should show for a given response
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    Render(ChartSeries),
    Empty { message: &'static str },
    Failed { message: &'static str, reason: String },
}

impl ChartOutcome {
    pub fn classify(kind: ChartKind, response: Result<ChartSeries, ApiError>) -> Self {
        match response {
            Err(e) => ChartOutcome::Failed {
                message: kind.error_message(),
                reason: e.to_string(),
            },
            Ok(series) if series.is_empty() => ChartOutcome::Empty {
                message: kind.empty_message(),
            },
            // a donut needs something to divide up
            Ok(series) if kind == ChartKind::Category && series.positive_total() <= 0.0 => {
                ChartOutcome::Empty {
                    message: kind.empty_message(),
                }
            }
            Ok(series) => ChartOutcome::Render(series),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder(outcome: &ChartOutcome) -> Option<&'static str> {
        match outcome {
            ChartOutcome::Render(_) => None,
            ChartOutcome::Empty { message } | ChartOutcome::Failed { message, .. } => Some(*message),
        }
    }

    fn series(labels: &[&str], data: &[f64]) -> ChartSeries {
        ChartSeries {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            data: data.to_vec(),
        }
    }

    #[test]
    fn test_empty_labels_give_no_data_placeholder() {
        let outcome = ChartOutcome::classify(ChartKind::Category, Ok(series(&[], &[])));
        assert_eq!(
            outcome,
            ChartOutcome::Empty {
                message: "No expense data available for the selected period"
            }
        );
        assert!(!matches!(outcome, ChartOutcome::Failed { .. }));

        let outcome = ChartOutcome::classify(ChartKind::Trend, Ok(series(&[], &[])));
        assert_eq!(placeholder(&outcome), Some("No expense trend data available"));
    }

    #[test]
    fn test_transport_failure_gives_error_placeholder() {
        let outcome = ChartOutcome::classify(
            ChartKind::Trend,
            Err(ApiError::Network("connection refused".to_string())),
        );
        assert_eq!(placeholder(&outcome), Some("Error loading trend data"));
        match outcome {
            ChartOutcome::Failed { reason, .. } => assert!(reason.contains("connection refused")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_payload_is_a_failure() {
        let outcome = ChartOutcome::classify(
            ChartKind::Category,
            Err(ApiError::Malformed("2 labels but 1 values".to_string())),
        );
        assert_eq!(placeholder(&outcome), Some("Error loading category data"));
    }

    #[test]
    fn test_all_zero_categories_are_empty_but_flat_trend_renders() {
        let zeros = series(&["Food"], &[0.0]);
        assert!(matches!(
            ChartOutcome::classify(ChartKind::Category, Ok(zeros.clone())),
            ChartOutcome::Empty { .. }
        ));
        assert_eq!(
            ChartOutcome::classify(ChartKind::Trend, Ok(zeros.clone())),
            ChartOutcome::Render(zeros)
        );
    }

    #[test]
    fn test_surface_ids() {
        assert_eq!(ChartKind::Category.surface_id(), "categoryChart");
        assert_eq!(ChartKind::Trend.surface_id(), "trendChart");
    }
}

//! Dashboard reporting: loads the aggregate endpoints and renders the two
//! charts, the insights panel and the summary stat tiles.
//!
//! Every load runs concurrently through `spawn_local`. Each surface has a
//! request generation in a [`WidgetRegistry`]; a response is applied only if
//! no newer request for the same surface was issued meanwhile.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::{ChartSeries, ExpenseStats, Period};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlSelectElement, MouseEvent};
use yew::AppHandle;

use crate::charts::category::category_tooltip;
use crate::charts::trend::trend_tooltip;
use crate::charts::{
    draw_category_chart, draw_placeholder, draw_trend_chart, ChartError, ChartKind, ChartOutcome, DonutGeometry,
    TrendGeometry, WidgetRegistry,
};
use crate::components::insights_panel::{InsightsPanel, InsightsPanelProps, InsightsState};
use crate::config::AppConfig;
use crate::dom::element_by_id;
use crate::services::currency::dollars;
use crate::services::{ApiClient, ApiError, Logger};

const COMPONENT: &str = "dashboard";

pub const PERIOD_SELECT_ID: &str = "chartPeriod";
pub const INSIGHTS_ID: &str = "financialInsights";
pub const TOTAL_EXPENSE_ID: &str = "totalExpense";
pub const AVG_EXPENSE_ID: &str = "avgExpense";
pub const EXPENSE_COUNT_ID: &str = "expenseCount";
/// Registry key for the stat tiles; they hold no widget, only a generation
const STATS_SURFACE: &str = "expenseStats";

/// Display strings for the three stat tiles
#[derive(Debug, Clone, PartialEq)]
pub struct StatsText {
    pub total: String,
    pub average_per_day: String,
    pub count: String,
}

impl StatsText {
    pub fn from_stats(stats: &ExpenseStats) -> Self {
        Self {
            total: dollars(stats.total),
            average_per_day: dollars(stats.average_per_day),
            count: stats.count.to_string(),
        }
    }

    /// Shown when the stats request fails
    pub fn zeroed() -> Self {
        Self::from_stats(&ExpenseStats::default())
    }
}

#[derive(Clone)]
struct StatTargets {
    total: Element,
    average: Element,
    count: Element,
}

impl StatTargets {
    /// All three tiles, or none
    fn find(document: &Document) -> Option<Self> {
        Some(Self {
            total: document.get_element_by_id(TOTAL_EXPENSE_ID)?,
            average: document.get_element_by_id(AVG_EXPENSE_ID)?,
            count: document.get_element_by_id(EXPENSE_COUNT_ID)?,
        })
    }

    fn apply(&self, text: &StatsText) {
        self.total.set_text_content(Some(&text.total));
        self.average.set_text_content(Some(&text.average_per_day));
        self.count.set_text_content(Some(&text.count));
    }
}

/// Hit-testing data for a drawn chart, paired with the series it shows
enum HoverMap {
    Category(DonutGeometry, ChartSeries),
    Trend(TrendGeometry, ChartSeries),
}

impl HoverMap {
    /// Tooltip for the surface pixel `(x, y)`
    fn tooltip(&self, x: f64, y: f64) -> Option<String> {
        let (index, series) = match self {
            HoverMap::Category(geometry, series) => (geometry.segment_at(x, y)?, series),
            HoverMap::Trend(geometry, series) => (geometry.point_near(x, y)?, series),
        };
        let (label, value) = series.points().nth(index)?;
        Some(match self {
            HoverMap::Category(..) => category_tooltip(label, value),
            HoverMap::Trend(..) => trend_tooltip(label, value),
        })
    }
}

/// Map a CSS-pixel offset onto the canvas bitmap when the two sizes differ
fn surface_offset(offset: i32, client_size: i32, surface_size: u32) -> f64 {
    if client_size <= 0 {
        return offset as f64;
    }
    offset as f64 * surface_size as f64 / client_size as f64
}

/// The dashboard bound to one page
pub struct Dashboard {
    api: ApiClient,
    trend_months: u32,
    default_period: Period,
    category_canvas: Option<HtmlCanvasElement>,
    trend_canvas: Option<HtmlCanvasElement>,
    period_select: Option<HtmlSelectElement>,
    stat_targets: Option<StatTargets>,
    insights_container: Option<Element>,
    surfaces: RefCell<WidgetRegistry<EventListener>>,
    panels: RefCell<WidgetRegistry<AppHandle<InsightsPanel>>>,
}

impl Dashboard {
    pub fn attach(document: &Document, config: &AppConfig) -> Rc<Self> {
        let api = if config.api_base_url.is_empty() {
            ApiClient::new()
        } else {
            ApiClient::with_base_url(config.api_base_url.clone())
        };

        Rc::new(Self {
            api,
            trend_months: config.trend_months,
            default_period: config.default_period,
            category_canvas: element_by_id(document, ChartKind::Category.surface_id()),
            trend_canvas: element_by_id(document, ChartKind::Trend.surface_id()),
            period_select: element_by_id(document, PERIOD_SELECT_ID),
            stat_targets: StatTargets::find(document),
            insights_container: document.get_element_by_id(INSIGHTS_ID),
            surfaces: RefCell::new(WidgetRegistry::new()),
            panels: RefCell::new(WidgetRegistry::new()),
        })
    }

    /// Period selected in the page control, or the configured default
    pub fn current_period(&self) -> Period {
        self.period_select
            .as_ref()
            .and_then(|select| select.value().parse().ok())
            .unwrap_or(self.default_period)
    }

    /// Initial load of every panel
    pub fn load_all(self: &Rc<Self>) {
        let period = self.current_period();
        Logger::debug_with_component(COMPONENT, &format!("loading dashboard for period {}", period));
        self.render_charts(period);
        self.render_insights();
        self.render_summary_stats(period);
    }

    pub fn render_charts(self: &Rc<Self>, period: Period) {
        if self.category_canvas.is_none() || self.trend_canvas.is_none() {
            Logger::error_with_component(COMPONENT, "Chart canvas elements not found");
            return;
        }
        self.render_category_breakdown(period);
        self.render_monthly_trend();
    }

    pub fn render_category_breakdown(self: &Rc<Self>, period: Period) {
        let kind = ChartKind::Category;
        let generation = self.surfaces.borrow_mut().begin(kind.surface_id());
        let this = Rc::clone(self);
        spawn_local(async move {
            let response = this.api.get_category_breakdown(period).await;
            this.apply_chart(kind, generation, response);
        });
    }

    pub fn render_monthly_trend(self: &Rc<Self>) {
        let kind = ChartKind::Trend;
        let generation = self.surfaces.borrow_mut().begin(kind.surface_id());
        let months = self.trend_months;
        let this = Rc::clone(self);
        spawn_local(async move {
            let response = this.api.get_monthly_trend(months).await;
            this.apply_chart(kind, generation, response);
        });
    }

    fn canvas(&self, kind: ChartKind) -> Option<&HtmlCanvasElement> {
        match kind {
            ChartKind::Category => self.category_canvas.as_ref(),
            ChartKind::Trend => self.trend_canvas.as_ref(),
        }
    }

    fn apply_chart(&self, kind: ChartKind, generation: u64, response: Result<ChartSeries, ApiError>) {
        let surface = kind.surface_id();
        if !self.surfaces.borrow().is_current(surface, generation) {
            Logger::debug_with_component(COMPONENT, &format!("dropping stale response for {}", surface));
            return;
        }
        let Some(canvas) = self.canvas(kind) else {
            return;
        };

        let outcome = ChartOutcome::classify(kind, response);
        match &outcome {
            ChartOutcome::Render(series) => Logger::debug_with_component(
                COMPONENT,
                &format!("drawing {} with {} points", surface, series.len()),
            ),
            ChartOutcome::Empty { .. } => {
                Logger::info_with_component(COMPONENT, &format!("no data for {}", surface))
            }
            ChartOutcome::Failed { reason, .. } => {
                Logger::error_with_component(COMPONENT, &format!("failed to load {}: {}", surface, reason))
            }
        }

        fit_canvas(canvas);
        self.clear_chart(kind);

        let drawn = match outcome {
            ChartOutcome::Render(series) => draw_on_canvas(canvas, |root| match kind {
                ChartKind::Category => {
                    draw_category_chart(root, &series).map(|geometry| HoverMap::Category(geometry, series.clone()))
                }
                ChartKind::Trend => {
                    draw_trend_chart(root, &series).map(|geometry| HoverMap::Trend(geometry, series.clone()))
                }
            })
            .map(Some),
            ChartOutcome::Empty { message } | ChartOutcome::Failed { message, .. } => {
                draw_on_canvas(canvas, |root| draw_placeholder(root, message)).map(|_| None)
            }
        };

        match drawn {
            Ok(Some(hover)) => {
                let listener = hover_listener(canvas, hover);
                drop(self.surfaces.borrow_mut().replace(surface, listener));
            }
            Ok(None) => {}
            Err(e) => Logger::error_with_component(COMPONENT, &format!("could not draw {}: {}", surface, e)),
        }
    }

    /// Blank a chart surface and retire its hover listener
    fn clear_chart(&self, kind: ChartKind) {
        let Some(canvas) = self.canvas(kind) else {
            return;
        };
        drop(self.surfaces.borrow_mut().take(kind.surface_id()));
        let _ = canvas.remove_attribute("title");
        clear_surface(canvas);
    }

    pub fn render_insights(self: &Rc<Self>) {
        if self.insights_container.is_none() {
            return;
        }
        let generation = self.panels.borrow_mut().begin(INSIGHTS_ID);
        let this = Rc::clone(self);
        spawn_local(async move {
            let state = match this.api.get_financial_insights().await {
                Ok(insights) => InsightsState::Loaded(insights),
                Err(e) => {
                    Logger::error_with_component(COMPONENT, &format!("failed to load insights: {}", e));
                    InsightsState::Unavailable
                }
            };
            this.mount_insights(generation, state);
        });
    }

    fn mount_insights(&self, generation: u64, state: InsightsState) {
        if !self.panels.borrow().is_current(INSIGHTS_ID, generation) {
            return;
        }
        let Some(container) = self.insights_container.clone() else {
            return;
        };

        if let Some(previous) = self.panels.borrow_mut().take(INSIGHTS_ID) {
            previous.destroy();
        }
        // drop any server-rendered placeholder before the component takes over
        container.set_inner_html("");

        let handle = yew::Renderer::<InsightsPanel>::with_root_and_props(container, InsightsPanelProps { state }).render();
        if let Some(stale) = self.panels.borrow_mut().replace(INSIGHTS_ID, handle) {
            stale.destroy();
        }
    }

    pub fn render_summary_stats(self: &Rc<Self>, period: Period) {
        let Some(targets) = self.stat_targets.clone() else {
            Logger::debug_with_component(COMPONENT, "summary stat targets not found, skipping");
            return;
        };
        let generation = self.surfaces.borrow_mut().begin(STATS_SURFACE);
        let this = Rc::clone(self);
        spawn_local(async move {
            let text = match this.api.get_expense_stats(period).await {
                Ok(stats) => StatsText::from_stats(&stats),
                Err(e) => {
                    Logger::error_with_component(COMPONENT, &format!("failed to load expense stats: {}", e));
                    StatsText::zeroed()
                }
            };
            if this.surfaces.borrow().is_current(STATS_SURFACE, generation) {
                targets.apply(&text);
            }
        });
    }

    /// Redraw everything for the period now selected
    pub fn on_period_change(self: &Rc<Self>) {
        self.clear_chart(ChartKind::Category);
        self.clear_chart(ChartKind::Trend);

        let period = self.current_period();
        Logger::debug_with_component(COMPONENT, &format!("period changed to {}", period));
        self.render_charts(period);
        self.render_insights();
        self.render_summary_stats(period);
    }

    /// Reload on every change of the period control
    pub fn bind_period_control(self: &Rc<Self>) {
        let Some(select) = &self.period_select else {
            return;
        };
        let weak: Weak<Self> = Rc::downgrade(self);
        EventListener::new(select, "change", move |_| {
            if let Some(dashboard) = weak.upgrade() {
                dashboard.on_period_change();
            }
        })
        .forget();
    }
}

/// Run a drawing routine against a canvas element
fn draw_on_canvas<T>(
    canvas: &HtmlCanvasElement,
    draw: impl FnOnce(&DrawingArea<CanvasBackend, plotters::coord::Shift>) -> Result<T, ChartError>,
) -> Result<T, ChartError> {
    let backend = CanvasBackend::with_canvas_object(canvas.clone()).ok_or(ChartError::SurfaceUnavailable)?;
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;
    draw(&root)
}

/// Size the canvas bitmap to its laid-out size so drawing is not stretched
fn fit_canvas(canvas: &HtmlCanvasElement) {
    let (width, height) = (canvas.client_width(), canvas.client_height());
    if width > 0 && height > 0 {
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
    }
}

fn clear_surface(canvas: &HtmlCanvasElement) {
    let context = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
    match context {
        Some(context) => context.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64),
        None => Logger::warn_with_component(COMPONENT, &format!("no 2d context on {}", canvas.id())),
    }
}

/// Keep the canvas `title` in step with whatever the pointer is over
fn hover_listener(canvas: &HtmlCanvasElement, hover: HoverMap) -> EventListener {
    let target = canvas.clone();
    EventListener::new(canvas, "mousemove", move |event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let x = surface_offset(event.offset_x(), target.client_width(), target.width());
        let y = surface_offset(event.offset_y(), target.client_height(), target.height());

        let result = match hover.tooltip(x, y) {
            Some(text) => target.set_attribute("title", &text),
            None => target.remove_attribute("title"),
        };
        if let Err(e) = result {
            Logger::warn_with_component(COMPONENT, &format!("could not update tooltip: {:?}", e));
        }
    })
}

//! WebAssembly front end for the expense tracker pages.
//!
//! Boots once the DOM is ready: reads the page config, wires the form and
//! table interactions, and starts the dashboard when the page has one.
//! A few entry points are exported for inline page scripts.

pub mod charts;
pub mod components;
pub mod config;
pub mod dashboard;
pub mod dom;
pub mod interactions;
pub mod services;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::charts::ChartKind;
use crate::config::AppConfig;
use crate::dashboard::Dashboard;
use crate::dom::DocumentFields;
use crate::services::Logger;

thread_local! {
    static DASHBOARD: RefCell<Option<Rc<Dashboard>>> = RefCell::new(None);
}

fn page_document() -> Option<Document> {
    web_sys::window()?.document()
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(document) = page_document() else {
        Logger::error_with_component("boot", "no document available");
        return;
    };

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", move |_| {
            if let Some(document) = page_document() {
                boot(&document);
            }
        })
        .forget();
    } else {
        boot(&document);
    }
}

fn boot(document: &Document) {
    let config = AppConfig::from_document(document);
    Logger::set_debug_enabled(config.debug_logging);
    Logger::debug_with_component("boot", &format!("config: {:?}", config));

    interactions::initialize(document);

    if document.get_element_by_id(ChartKind::Category.surface_id()).is_none() {
        return;
    }

    let dashboard = Dashboard::attach(document, &config);
    dashboard.bind_period_control();
    dashboard.load_all();
    DASHBOARD.with(|slot| *slot.borrow_mut() = Some(dashboard));
}

/// Validate the expense form on the page, marking each field
#[wasm_bindgen(js_name = validateExpenseForm)]
pub fn validate_expense_form() -> bool {
    match page_document() {
        Some(document) => interactions::expense_form::validate_expense_form(&DocumentFields::new(document)),
        None => false,
    }
}

#[wasm_bindgen(js_name = formatCurrency)]
pub fn format_currency(amount: f64) -> String {
    services::currency::format_currency(amount)
}

/// Reload the dashboard for the currently selected period
#[wasm_bindgen(js_name = updateChartPeriod)]
pub fn update_chart_period() {
    let dashboard = DASHBOARD.with(|slot| slot.borrow().clone());
    match dashboard {
        Some(dashboard) => dashboard.on_period_change(),
        None => Logger::warn_with_component("dashboard", "period change requested but no dashboard is active"),
    }
}

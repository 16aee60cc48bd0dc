use chrono::NaiveDate;
use gloo::events::{EventListener, EventListenerOptions};
use shared::Period;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlFormElement, HtmlInputElement};

use crate::dom::{element_by_id, query_all};
use crate::services::date_utils::current_local_date;
use crate::services::Logger;

pub const QUICK_FILTER_SELECTOR: &str = ".quick-filter";
pub const FILTER_FORM_ID: &str = "filter-form";
pub const START_DATE_ID: &str = "start_date";
pub const END_DATE_ID: &str = "end_date";
const COMPONENT: &str = "quick-filters";

/// Intercept clicks on quick date-range controls; returns how many were bound
pub fn initialize_quick_filters(document: &Document) -> usize {
    let controls = query_all(document, QUICK_FILTER_SELECTOR);

    for control in &controls {
        let element = control.clone();
        let document = document.clone();
        EventListener::new_with_options(
            control,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();

                let raw = element.get_attribute("data-period").unwrap_or_default();
                let period = match raw.parse::<Period>() {
                    Ok(period) => period,
                    Err(e) => {
                        Logger::warn_with_component(COMPONENT, &e.to_string());
                        return;
                    }
                };

                if let Err(err) = apply_quick_filter(&document, period) {
                    Logger::error_with_component(COMPONENT, &format!("failed to apply {} filter: {:?}", period, err));
                }
            },
        )
        .forget();
    }

    controls.len()
}

/// Fill the filter form's date bounds for `period` and submit it
fn apply_quick_filter(document: &Document, period: Period) -> Result<(), JsValue> {
    match fill_quick_range(document, period, current_local_date()) {
        Some(form) => form.submit(),
        None => Ok(()),
    }
}

/// Write the `period` bounds relative to `today` into the date fields and
/// hand back the filter form to submit, if the page has one
pub fn fill_quick_range(document: &Document, period: Period, today: NaiveDate) -> Option<HtmlFormElement> {
    let range = period.quick_range(today);

    if let Some(start) = element_by_id::<HtmlInputElement>(document, START_DATE_ID) {
        start.set_value(&range.start_value());
    }
    if let Some(end) = element_by_id::<HtmlInputElement>(document, END_DATE_ID) {
        end.set_value(&range.end_value());
    }

    element_by_id::<HtmlFormElement>(document, FILTER_FORM_ID)
}

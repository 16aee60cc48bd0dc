use gloo::events::{EventListener, EventListenerOptions};
use shared::{SortState, SORT_BY_PARAM, SORT_ORDER_PARAM};
use wasm_bindgen::JsValue;
use web_sys::{Document, Url};

use crate::dom::query_all;
use crate::services::Logger;

pub const SORT_LINK_SELECTOR: &str = ".sort-link";
const COMPONENT: &str = "sorting";

/// Intercept clicks on sortable column headers; returns how many links were bound
pub fn initialize_sorting(document: &Document) -> usize {
    let links = query_all(document, SORT_LINK_SELECTOR);

    for link in &links {
        let element = link.clone();
        EventListener::new_with_options(
            link,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();

                let Some(column) = element.get_attribute("data-sort").filter(|c| !c.is_empty()) else {
                    Logger::warn_with_component(COMPONENT, "sort link without a data-sort column");
                    return;
                };

                if let Err(err) = navigate_sorted(&column) {
                    Logger::error_with_component(COMPONENT, &format!("failed to apply sort: {:?}", err));
                }
            },
        )
        .forget();
    }

    links.len()
}

/// Reload the current page with `sort_by` / `sort_order` toggled for `column`
fn navigate_sorted(column: &str) -> Result<(), JsValue> {
    let location = gloo::utils::window().location();
    let href = sorted_href(&location.href()?, column)?;
    location.set_href(&href)
}

/// `href` with its sort parameters toggled for `column`; other parameters are kept
pub fn sorted_href(href: &str, column: &str) -> Result<String, JsValue> {
    let url = Url::new(href)?;
    let params = url.search_params();

    let current = SortState::from_query(
        params.get(SORT_BY_PARAM).as_deref(),
        params.get(SORT_ORDER_PARAM).as_deref(),
    );
    let next = current.toggled(column);

    params.set(SORT_BY_PARAM, &next.sort_by);
    params.set(SORT_ORDER_PARAM, next.sort_order.as_str());

    Logger::debug_with_component(
        COMPONENT,
        &format!("sorting by {} {}", next.sort_by, next.sort_order.as_str()),
    );
    Ok(url.href())
}

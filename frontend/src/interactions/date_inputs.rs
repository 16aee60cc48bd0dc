use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement};

use crate::dom::query_all;
use crate::services::date_utils::get_current_date;

/// Date inputs that opt out with `data-no-init` keep their empty value
pub const DATE_INPUT_SELECTOR: &str = "input[type=\"date\"]:not([data-no-init])";

/// Default every empty date input to today's local date; returns how many were filled
pub fn initialize_date_inputs(document: &Document) -> usize {
    let inputs: Vec<HtmlInputElement> = query_all(document, DATE_INPUT_SELECTOR)
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlInputElement>().ok())
        .filter(|input| input.value().is_empty())
        .collect();

    if inputs.is_empty() {
        return 0;
    }

    let today = get_current_date();
    for input in &inputs {
        input.set_value(&today);
    }
    inputs.len()
}

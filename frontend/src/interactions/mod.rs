//! Behavior for the server-rendered expense pages: date defaults, sortable
//! table headers, quick date filters, delete confirmation and the expense form.
//!
//! Each initializer binds to whatever matching elements the page has and does
//! nothing when there are none.

pub mod date_inputs;
pub mod delete_confirmation;
pub mod expense_form;
pub mod quick_filters;
pub mod sorting;

use web_sys::Document;

use crate::services::Logger;

/// Wire up every interaction present on the page
pub fn initialize(document: &Document) {
    let filled_dates = date_inputs::initialize_date_inputs(document);
    let sort_links = sorting::initialize_sorting(document);
    let quick_filters = quick_filters::initialize_quick_filters(document);
    let delete_triggers = delete_confirmation::initialize_delete_confirmation(document);
    let expense_form = expense_form::initialize_expense_form(document);

    Logger::debug_with_component(
        "interactions",
        &format!(
            "bound {} sort links, {} quick filters, {} delete triggers, expense form: {}; defaulted {} date inputs",
            sort_links, quick_filters, delete_triggers, expense_form, filled_dates
        ),
    );
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_initializers_do_nothing_without_targets() {
        let document = gloo::utils::document();

        assert_eq!(date_inputs::initialize_date_inputs(&document), 0);
        assert_eq!(sorting::initialize_sorting(&document), 0);
        assert_eq!(quick_filters::initialize_quick_filters(&document), 0);
        assert_eq!(delete_confirmation::initialize_delete_confirmation(&document), 0);
        assert!(!expense_form::initialize_expense_form(&document));
    }

    #[wasm_bindgen_test]
    fn test_initializers_count_what_they_bind() {
        let document = gloo::utils::document();
        let container = document.create_element("div").unwrap();
        container.set_inner_html(
            r##"<a class="sort-link" data-sort="date" href="#">Date</a>
               <a class="sort-link" data-sort="amount" href="#">Amount</a>
               <button class="quick-filter" data-period="week">This week</button>
               <a class="delete-expense" href="/expenses/1/delete">Delete</a>
               <form><input id="amount" type="number"></form>"##,
        );
        gloo::utils::body().append_child(&container).unwrap();

        assert_eq!(sorting::initialize_sorting(&document), 2);
        assert_eq!(quick_filters::initialize_quick_filters(&document), 1);
        assert_eq!(delete_confirmation::initialize_delete_confirmation(&document), 1);
        assert!(expense_form::initialize_expense_form(&document));

        container.remove();
    }
}

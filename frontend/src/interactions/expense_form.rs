use gloo::events::{EventListener, EventListenerOptions};
use shared::{ExpenseField, ExpenseFormInput};
use web_sys::Document;

use crate::dom::{DocumentFields, FormFields};
use crate::services::Logger;

/// Collect the expense form's raw values; missing fields read as empty
pub fn read_expense_form<F: FormFields>(fields: &F) -> ExpenseFormInput {
    let value = |field: ExpenseField| fields.field_value(field.element_id()).unwrap_or_default();
    ExpenseFormInput {
        amount: value(ExpenseField::Amount),
        date: value(ExpenseField::Date),
        description: value(ExpenseField::Description),
        category: value(ExpenseField::Category),
    }
}

/// Validate the expense form and mark every field valid or invalid.
///
/// Does not block submission itself; callers branch on the result.
pub fn validate_expense_form<F: FormFields>(fields: &F) -> bool {
    let validation = read_expense_form(fields).validate();

    for field in ExpenseField::ALL {
        match validation.error_for(field) {
            Some(error) => fields.mark_invalid(field.element_id(), error.message()),
            None => fields.mark_valid(field.element_id()),
        }
    }

    validation.is_valid
}

/// Cancel submission of the form holding the `amount` field while it fails validation
pub fn initialize_expense_form(document: &Document) -> bool {
    let Some(form) = document
        .get_element_by_id(ExpenseField::Amount.element_id())
        .and_then(|amount| amount.closest("form").ok().flatten())
    else {
        return false;
    };

    let fields = DocumentFields::new(document.clone());
    EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            if !validate_expense_form(&fields) {
                event.prevent_default();
                Logger::debug_with_component("expense-form", "submission blocked by validation");
            }
        },
    )
    .forget();

    true
}

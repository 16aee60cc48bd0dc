use gloo::events::{EventListener, EventListenerOptions};
use web_sys::Document;

use crate::dom::query_all;

pub const DELETE_TRIGGER_SELECTOR: &str = ".delete-expense";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this expense?";

/// Ask before any delete trigger fires; declining cancels the click's default action
pub fn initialize_delete_confirmation(document: &Document) -> usize {
    let triggers = query_all(document, DELETE_TRIGGER_SELECTOR);

    for trigger in &triggers {
        EventListener::new_with_options(
            trigger,
            "click",
            EventListenerOptions::enable_prevent_default(),
            |event| {
                if !gloo::dialogs::confirm(DELETE_PROMPT) {
                    event.prevent_default();
                }
            },
        )
        .forget();
    }

    triggers.len()
}

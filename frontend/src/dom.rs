//! Thin helpers over the page DOM.
//!
//! Form validation talks to the page through [`FormFields`] so it can be
//! exercised against an in-memory form in tests.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

pub const INVALID_CLASS: &str = "is-invalid";
pub const VALID_CLASS: &str = "is-valid";
pub const FEEDBACK_CLASS: &str = "invalid-feedback";

/// Element with `id`, if present and of type `T`
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Every element matching `selector`, in document order
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Current value of an input, select or textarea
pub fn control_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        return Some(select.value());
    }
    element.dyn_ref::<HtmlTextAreaElement>().map(|area| area.value())
}

/// Read access to form values plus the inline validity markers
pub trait FormFields {
    /// `None` when the page has no such field
    fn field_value(&self, id: &str) -> Option<String>;
    fn mark_invalid(&self, id: &str, message: &str);
    fn mark_valid(&self, id: &str);
}

/// [`FormFields`] backed by the live document, using Bootstrap's validation classes
#[derive(Clone)]
pub struct DocumentFields {
    document: Document,
}

impl DocumentFields {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn feedback_sibling(element: &Element) -> Option<Element> {
        element
            .next_element_sibling()
            .filter(|sibling| sibling.class_list().contains(FEEDBACK_CLASS))
    }

    fn insert_feedback(&self, element: &Element) -> Result<Element, JsValue> {
        let feedback = self.document.create_element("div")?;
        feedback.set_class_name(FEEDBACK_CLASS);
        if let Some(parent) = element.parent_node() {
            parent.insert_before(&feedback, element.next_sibling().as_ref())?;
        }
        Ok(feedback)
    }
}

impl FormFields for DocumentFields {
    fn field_value(&self, id: &str) -> Option<String> {
        control_value(&self.document.get_element_by_id(id)?)
    }

    fn mark_invalid(&self, id: &str, message: &str) {
        let Some(element) = self.document.get_element_by_id(id) else {
            return;
        };
        let classes = element.class_list();
        let _ = classes.remove_1(VALID_CLASS);
        let _ = classes.add_1(INVALID_CLASS);

        let feedback = match Self::feedback_sibling(&element) {
            Some(feedback) => feedback,
            None => match self.insert_feedback(&element) {
                Ok(feedback) => feedback,
                Err(_) => return,
            },
        };
        feedback.set_text_content(Some(message));
    }

    fn mark_valid(&self, id: &str) {
        let Some(element) = self.document.get_element_by_id(id) else {
            return;
        };
        let classes = element.class_list();
        let _ = classes.remove_1(INVALID_CLASS);
        let _ = classes.add_1(VALID_CLASS);

        if let Some(feedback) = Self::feedback_sibling(&element) {
            feedback.remove();
        }
    }
}

use std::cell::Cell;

thread_local! {
    static DEBUG_ENABLED: Cell<bool> = Cell::new(cfg!(debug_assertions));
}

/// Component-tagged logging to the browser console
pub struct Logger;

impl Logger {
    /// Toggle debug output, normally from `AppConfig::debug_logging`
    pub fn set_debug_enabled(enabled: bool) {
        DEBUG_ENABLED.with(|flag| flag.set(enabled));
    }

    pub fn debug_enabled() -> bool {
        DEBUG_ENABLED.with(Cell::get)
    }

    pub fn debug_with_component(component: &str, message: &str) {
        if Self::debug_enabled() {
            gloo::console::debug!(Self::line(component, message));
        }
    }

    pub fn info_with_component(component: &str, message: &str) {
        gloo::console::info!(Self::line(component, message));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        gloo::console::warn!(Self::line(component, message));
    }

    pub fn error_with_component(component: &str, message: &str) {
        gloo::console::error!(Self::line(component, message));
    }

    fn line(component: &str, message: &str) -> String {
        format!("[{}] {}", component, message)
    }
}

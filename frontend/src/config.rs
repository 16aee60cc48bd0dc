use serde::{Deserialize, Serialize};
use shared::Period;
use web_sys::Document;

use crate::services::Logger;

/// Id of the optional `<script type="application/json">` block carrying page configuration
pub const CONFIG_ELEMENT_ID: &str = "dashboard-config";

/// Page-level settings; every field has a default so the config block can be partial or absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix for API requests; empty means same origin
    pub api_base_url: String,
    /// Trailing window of the monthly trend chart
    pub trend_months: u32,
    /// Used when the period control is missing or holds an unknown value
    pub default_period: Period,
    pub debug_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            trend_months: 6,
            default_period: Period::Month,
            debug_logging: false,
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut config: AppConfig = serde_json::from_str(raw)?;
        config.trend_months = config.trend_months.max(1);
        Ok(config)
    }

    /// Reads the config block from the page, falling back to defaults
    pub fn from_document(document: &Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                Logger::warn_with_component("config", &format!("ignoring malformed page config: {}", e));
                Self::default()
            }
        }
    }
}

pub mod insights_panel;

pub use insights_panel::{InsightsPanel, InsightsPanelProps, InsightsState};

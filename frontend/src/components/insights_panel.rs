use yew::prelude::*;
use shared::FinancialInsights;
use crate::services::currency::dollars;

pub const UNAVAILABLE_MESSAGE: &str = "Unable to load financial insights.";

/// What the insights container currently shows
#[derive(Clone, Debug, PartialEq)]
pub enum InsightsState {
    Loaded(FinancialInsights),
    Unavailable,
}

#[derive(Properties, PartialEq)]
pub struct InsightsPanelProps {
    pub state: InsightsState,
}

/// Label/value pairs in display order
pub fn insight_rows(insights: &FinancialInsights) -> Vec<(&'static str, String)> {
    vec![
        ("Top Spending Category", insights.top_spending_category.clone()),
        ("Biggest Expense", insights.biggest_expense.clone()),
        ("Average Transaction", dollars(insights.average_transaction)),
        ("Spending Trend", insights.spending_trend.clone()),
    ]
}

#[function_component(InsightsPanel)]
pub fn insights_panel(props: &InsightsPanelProps) -> Html {
    match &props.state {
        InsightsState::Loaded(insights) => html! {
            <>
                {for insight_rows(insights).into_iter().map(|(label, value)| html! {
                    <div class="insight-item">
                        <div class="insight-label">{label}</div>
                        <div class="insight-value">{value}</div>
                    </div>
                })}
            </>
        },
        InsightsState::Unavailable => html! {
            <p class="text-muted">{UNAVAILABLE_MESSAGE}</p>
        },
    }
}

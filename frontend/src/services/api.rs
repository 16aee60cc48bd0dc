use gloo::net::http::Request;
use serde::de::DeserializeOwned;
use shared::{CategoryBreakdownResponse, ChartSeries, ExpenseStats, FinancialInsights, MonthlyTrendResponse, Period};
use thiserror::Error;

/// Failure of a single backend read
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// API client for the expense reporting endpoints
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Client that talks to the page's own origin
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn category_breakdown_url(&self, period: Period) -> String {
        format!("{}/api/category-breakdown?period={}", self.base_url, period.as_str())
    }

    pub fn monthly_trend_url(&self, months: u32) -> String {
        format!("{}/api/monthly-trend?months={}", self.base_url, months)
    }

    pub fn financial_insights_url(&self) -> String {
        format!("{}/api/financial-insights", self.base_url)
    }

    pub fn expense_stats_url(&self, period: Period) -> String {
        format!("{}/api/expense-stats?period={}", self.base_url, period.as_str())
    }

    /// Category totals for `period`
    pub async fn get_category_breakdown(&self, period: Period) -> Result<CategoryBreakdownResponse, ApiError> {
        checked_series(self.get_json(&self.category_breakdown_url(period)).await?)
    }

    /// Monthly totals over the trailing `months` window
    pub async fn get_monthly_trend(&self, months: u32) -> Result<MonthlyTrendResponse, ApiError> {
        checked_series(self.get_json(&self.monthly_trend_url(months)).await?)
    }

    pub async fn get_financial_insights(&self) -> Result<FinancialInsights, ApiError> {
        self.get_json(&self.financial_insights_url()).await
    }

    pub async fn get_expense_stats(&self, period: Period) -> Result<ExpenseStats, ApiError> {
        self.get_json(&self.expense_stats_url(period)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// Reject chart payloads whose labels and values do not line up
fn checked_series(series: ChartSeries) -> Result<ChartSeries, ApiError> {
    if series.labels.len() != series.data.len() {
        return Err(ApiError::Malformed(format!(
            "{} labels but {} values",
            series.labels.len(),
            series.data.len()
        )));
    }
    if !series.is_well_formed() {
        return Err(ApiError::Malformed("non-finite value in series".to_string()));
    }
    Ok(series)
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use chrono::{Datelike, Duration, NaiveDate};

/// Named time window the backend aggregates over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Today,
    Week,
    #[default]
    Month,
    Year,
    All,
}

impl Period {
    pub const ALL_PERIODS: [Period; 5] = [
        Period::Today,
        Period::Week,
        Period::Month,
        Period::Year,
        Period::All,
    ];

    /// Value used in query strings and `data-period` attributes
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        }
    }

    /// Filter bounds for the quick-range controls, relative to `today`.
    ///
    /// Weeks start on Sunday. Every bounded range ends today; `All` clears both bounds.
    pub fn quick_range(&self, today: NaiveDate) -> DateRange {
        let start = match self {
            Period::Today => today,
            Period::Week => today - Duration::days(today.weekday().num_days_from_sunday() as i64),
            Period::Month => today.with_day(1).unwrap_or(today),
            Period::Year => today.with_ordinal(1).unwrap_or(today),
            Period::All => return DateRange::unbounded(),
        };
        DateRange {
            start: Some(start),
            end: Some(today),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownPeriod(pub String);

impl fmt::Display for UnknownPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown period '{}'", self.0)
    }
}

impl std::error::Error for UnknownPeriod {}

impl FromStr for Period {
    type Err = UnknownPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Period::ALL_PERIODS
            .into_iter()
            .find(|period| period.as_str() == wanted)
            .ok_or_else(|| UnknownPeriod(s.to_string()))
    }
}

/// Start/end pair written into the expense filter form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn unbounded() -> Self {
        Self { start: None, end: None }
    }

    /// Start bound as an ISO date, or empty when unbounded
    pub fn start_value(&self) -> String {
        Self::input_value(self.start)
    }

    /// End bound as an ISO date, or empty when unbounded
    pub fn end_value(&self) -> String {
        Self::input_value(self.end)
    }

    fn input_value(date: Option<NaiveDate>) -> String {
        date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
    }
}

/// Labels with parallel values, as returned by the chart endpoints
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

/// Response of `/api/category-breakdown`
pub type CategoryBreakdownResponse = ChartSeries;

/// Response of `/api/monthly-trend`
pub type MonthlyTrendResponse = ChartSeries;

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Labels and values must pair up one-to-one
    pub fn is_well_formed(&self) -> bool {
        self.labels.len() == self.data.len() && self.data.iter().all(|v| v.is_finite())
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels.iter().map(String::as_str).zip(self.data.iter().copied())
    }

    /// Sum of the positive values
    pub fn positive_total(&self) -> f64 {
        self.data.iter().filter(|v| **v > 0.0).sum()
    }

    pub fn max_value(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }
}

/// Response of `/api/expense-stats`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpenseStats {
    pub total: f64,
    pub average_per_day: f64,
    pub count: u64,
}

/// Response of `/api/financial-insights`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInsights {
    pub top_spending_category: String,
    pub biggest_expense: String,
    pub average_transaction: f64,
    pub spending_trend: String,
}

pub const SORT_BY_PARAM: &str = "sort_by";
pub const SORT_ORDER_PARAM: &str = "sort_order";
pub const DEFAULT_SORT_COLUMN: &str = "date";

/// Direction of the expense table ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Anything other than an explicit `asc` reads as descending
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Sort column and direction carried in the expense list query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl SortState {
    /// Reads the current state from `sort_by` / `sort_order`, defaulting to newest first by date
    pub fn from_query(sort_by: Option<&str>, sort_order: Option<&str>) -> Self {
        Self {
            sort_by: sort_by
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_SORT_COLUMN)
                .to_string(),
            sort_order: SortOrder::from_param(sort_order),
        }
    }

    /// State after clicking the header for `column`.
    ///
    /// Only a click on the active column while ascending flips to descending;
    /// every other click, including switching columns, sorts ascending.
    pub fn toggled(&self, column: &str) -> SortState {
        let sort_order = if column == self.sort_by && self.sort_order == SortOrder::Asc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        SortState {
            sort_by: column.to_string(),
            sort_order,
        }
    }
}

/// Fields of the expense entry form, keyed by their element ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseField {
    Amount,
    Date,
    Description,
    Category,
}

impl ExpenseField {
    pub const ALL: [ExpenseField; 4] = [
        ExpenseField::Amount,
        ExpenseField::Date,
        ExpenseField::Description,
        ExpenseField::Category,
    ];

    pub fn element_id(&self) -> &'static str {
        match self {
            ExpenseField::Amount => "amount",
            ExpenseField::Date => "date",
            ExpenseField::Description => "description",
            ExpenseField::Category => "category",
        }
    }
}

/// Specific validation errors for the expense form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseValidationError {
    InvalidAmount,
    MissingDate,
    EmptyDescription,
    MissingCategory,
}

impl ExpenseValidationError {
    pub fn field(&self) -> ExpenseField {
        match self {
            ExpenseValidationError::InvalidAmount => ExpenseField::Amount,
            ExpenseValidationError::MissingDate => ExpenseField::Date,
            ExpenseValidationError::EmptyDescription => ExpenseField::Description,
            ExpenseValidationError::MissingCategory => ExpenseField::Category,
        }
    }

    /// Inline feedback shown next to the field
    pub fn message(&self) -> &'static str {
        match self {
            ExpenseValidationError::InvalidAmount => "Please enter a valid amount greater than zero",
            ExpenseValidationError::MissingDate => "Please select a date",
            ExpenseValidationError::EmptyDescription => "Please enter a description",
            ExpenseValidationError::MissingCategory => "Please select a category",
        }
    }
}

/// Raw values of the expense entry form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseFormInput {
    pub amount: String,
    pub date: String,
    pub description: String,
    pub category: String,
}

/// Validation result for the expense entry form
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFormValidation {
    pub is_valid: bool,
    pub errors: Vec<ExpenseValidationError>,
    pub cleaned_amount: Option<f64>,
}

impl ExpenseFormValidation {
    pub fn error_for(&self, field: ExpenseField) -> Option<ExpenseValidationError> {
        self.errors.iter().copied().find(|e| e.field() == field)
    }
}

impl ExpenseFormInput {
    pub fn validate(&self) -> ExpenseFormValidation {
        let mut errors = Vec::new();

        let cleaned_amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0);
        if cleaned_amount.is_none() {
            errors.push(ExpenseValidationError::InvalidAmount);
        }

        if self.date.is_empty() {
            errors.push(ExpenseValidationError::MissingDate);
        }

        if self.description.trim().is_empty() {
            errors.push(ExpenseValidationError::EmptyDescription);
        }

        if self.category.is_empty() {
            errors.push(ExpenseValidationError::MissingCategory);
        }

        ExpenseFormValidation {
            is_valid: errors.is_empty(),
            errors,
            cleaned_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_round_trips_through_its_query_value() {
        for period in Period::ALL_PERIODS {
            assert_eq!(period.as_str().parse::<Period>().unwrap(), period);
        }
        assert_eq!("  Week ".parse::<Period>().unwrap(), Period::Week);
        assert!("fortnight".parse::<Period>().is_err());
        assert_eq!(Period::default(), Period::Month);
    }

    #[test]
    fn test_period_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Period::Year).unwrap(), "\"year\"");
        let parsed: Period = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(parsed, Period::All);
    }

    #[test]
    fn test_week_range_starts_on_preceding_sunday() {
        // 2024-01-17 is a Wednesday
        let range = Period::Week.quick_range(date(2024, 1, 17));
        assert_eq!(range.start, Some(date(2024, 1, 14)));
        assert_eq!(range.end, Some(date(2024, 1, 17)));
        assert_eq!(range.start_value(), "2024-01-14");
        assert_eq!(range.end_value(), "2024-01-17");
    }

    #[test]
    fn test_week_range_on_sunday_is_a_single_day() {
        let range = Period::Week.quick_range(date(2024, 1, 14));
        assert_eq!(range.start, Some(date(2024, 1, 14)));
    }

    #[test]
    fn test_week_range_crosses_month_boundary() {
        // 2024-03-02 is a Saturday
        let range = Period::Week.quick_range(date(2024, 3, 2));
        assert_eq!(range.start, Some(date(2024, 2, 25)));
    }

    #[test]
    fn test_month_year_and_today_ranges() {
        let today = date(2024, 5, 23);
        assert_eq!(Period::Today.quick_range(today).start, Some(today));
        assert_eq!(Period::Today.quick_range(today).end, Some(today));
        assert_eq!(Period::Month.quick_range(today).start, Some(date(2024, 5, 1)));
        assert_eq!(Period::Year.quick_range(today).start, Some(date(2024, 1, 1)));
        assert_eq!(Period::Year.quick_range(today).end, Some(today));
    }

    #[test]
    fn test_all_range_clears_both_bounds() {
        let range = Period::All.quick_range(date(2024, 5, 23));
        assert_eq!(range, DateRange::unbounded());
        assert_eq!(range.start_value(), "");
        assert_eq!(range.end_value(), "");
    }

    #[test]
    fn test_chart_series_parses_backend_payload() {
        let series: ChartSeries =
            serde_json::from_str(r#"{"labels": ["Food", "Rent"], "data": [120.5, 900]}"#).unwrap();
        assert_eq!(series.len(), 2);
        assert!(series.is_well_formed());
        assert_eq!(series.points().collect::<Vec<_>>(), vec![("Food", 120.5), ("Rent", 900.0)]);
        assert_eq!(series.positive_total(), 1020.5);
        assert_eq!(series.max_value(), 900.0);
    }

    #[test]
    fn test_chart_series_with_mismatched_lengths_is_malformed() {
        let series = ChartSeries {
            labels: vec!["Food".to_string()],
            data: vec![],
        };
        assert!(!series.is_well_formed());
    }

    #[test]
    fn test_stats_and_insights_accept_integer_zeroes() {
        let stats: ExpenseStats =
            serde_json::from_str(r#"{"total": 0, "average_per_day": 0, "count": 0}"#).unwrap();
        assert_eq!(stats, ExpenseStats::default());

        let insights: FinancialInsights = serde_json::from_str(
            r#"{"top_spending_category": "No data available",
                "biggest_expense": "No data available",
                "average_transaction": 0,
                "spending_trend": "No data available"}"#,
        )
        .unwrap();
        assert_eq!(insights.average_transaction, 0.0);
    }

    #[test]
    fn test_sort_state_defaults_to_date_descending() {
        let state = SortState::from_query(None, None);
        assert_eq!(state.sort_by, "date");
        assert_eq!(state.sort_order, SortOrder::Desc);

        let state = SortState::from_query(Some("amount"), Some("bogus"));
        assert_eq!(state.sort_by, "amount");
        assert_eq!(state.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_sort_toggle() {
        let current = SortState::from_query(Some("date"), Some("desc"));

        let same = current.toggled("date");
        assert_eq!(same.sort_by, "date");
        assert_eq!(same.sort_order, SortOrder::Asc);

        let other = current.toggled("amount");
        assert_eq!(other.sort_by, "amount");
        assert_eq!(other.sort_order, SortOrder::Asc);

        let flipped = same.toggled("date");
        assert_eq!(flipped.sort_order, SortOrder::Desc);

        // Switching columns resets to ascending even from ascending
        let switched = same.toggled("category");
        assert_eq!(switched.sort_order, SortOrder::Asc);
    }

    fn valid_input() -> ExpenseFormInput {
        ExpenseFormInput {
            amount: "12.50".to_string(),
            date: "2024-01-01".to_string(),
            description: "Lunch".to_string(),
            category: "Food".to_string(),
        }
    }

    #[test]
    fn test_validation_success() {
        let result = valid_input().validate();
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.cleaned_amount, Some(12.5));
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let input = ExpenseFormInput {
            amount: "-5".to_string(),
            ..valid_input()
        };
        let result = input.validate();
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec![ExpenseValidationError::InvalidAmount]);
        assert_eq!(
            result.error_for(ExpenseField::Amount).map(|e| e.message()),
            Some("Please enter a valid amount greater than zero")
        );
        assert_eq!(result.error_for(ExpenseField::Date), None);
    }

    #[test]
    fn test_amount_edge_cases() {
        for amount in ["", "0", "0.00", "abc", "NaN", "inf", "   "] {
            let input = ExpenseFormInput {
                amount: amount.to_string(),
                ..valid_input()
            };
            assert!(!input.validate().is_valid, "amount {:?} should be rejected", amount);
        }
        let input = ExpenseFormInput {
            amount: " 0.01 ".to_string(),
            ..valid_input()
        };
        assert!(input.validate().is_valid);
    }

    #[test]
    fn test_all_fields_empty_reports_every_error() {
        let result = ExpenseFormInput {
            description: "   ".to_string(),
            ..ExpenseFormInput::default()
        }
        .validate();
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                ExpenseValidationError::InvalidAmount,
                ExpenseValidationError::MissingDate,
                ExpenseValidationError::EmptyDescription,
                ExpenseValidationError::MissingCategory,
            ]
        );
        for field in ExpenseField::ALL {
            assert_eq!(result.error_for(field).map(|e| e.field()), Some(field));
        }
    }

    #[test]
    fn test_field_element_ids() {
        let ids: Vec<_> = ExpenseField::ALL.iter().map(|f| f.element_id()).collect();
        assert_eq!(ids, vec!["amount", "date", "description", "category"]);
    }

    #[test]
    fn test_date_presence_uses_the_raw_value() {
        let blank = ExpenseFormInput {
            date: String::new(),
            ..valid_input()
        };
        assert_eq!(blank.validate().errors, vec![ExpenseValidationError::MissingDate]);

        let spaced = ExpenseFormInput {
            date: " ".to_string(),
            ..valid_input()
        };
        assert!(spaced.validate().error_for(ExpenseField::Date).is_none());
    }

    #[test]
    fn test_period_parsing_ignores_case_and_padding() {
        assert_eq!(" Week ".parse::<Period>(), Ok(Period::Week));
        assert_eq!("ALL".parse::<Period>(), Ok(Period::All));
        assert_eq!(
            "fortnight".parse::<Period>(),
            Err(UnknownPeriod("fortnight".to_string()))
        );
    }
}

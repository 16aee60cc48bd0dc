use chrono::NaiveDate;

/// Today's date in the browser's local timezone
pub fn current_local_date() -> NaiveDate {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Format a date the way `<input type="date">` expects it
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Get current date in YYYY-MM-DD format
pub fn get_current_date() -> String {
    format_iso(current_local_date())
}

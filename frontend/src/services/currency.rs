//! Money formatting helpers.
//!
//! The dashboard panels and chart labels use a plain `$` prefix with two
//! decimals. `format_currency` follows the site-wide regional convention:
//! Indian Rupees with lakh/crore digit grouping (`₹12,34,567.00`).

pub const RUPEE_SYMBOL: &str = "₹";

/// `$` prefix with exactly two decimals, no grouping
pub fn dollars(value: f64) -> String {
    if value < 0.0 && format!("{:.2}", value.abs()) != "0.00" {
        format!("-${:.2}", value.abs())
    } else {
        format!("${:.2}", value.abs())
    }
}

/// Axis tick label: `$` prefix, up to two decimals, trailing zeros dropped
pub fn axis_dollars(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "$0".to_string(),
        t => format!("${}", t),
    }
}

/// Format an amount as Indian Rupees with two decimals
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return format!("{}NaN", RUPEE_SYMBOL);
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{}{}∞", sign, RUPEE_SYMBOL);
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = amount < 0.0 && fixed != "0.00";

    format!(
        "{}{}{}.{}",
        if negative { "-" } else { "" },
        RUPEE_SYMBOL,
        group_indian(whole),
        fraction
    )
}

/// Last three digits form one group, the rest are grouped in pairs
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

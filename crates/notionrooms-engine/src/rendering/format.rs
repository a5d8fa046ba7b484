//! Locale-style formatting of numbers and dates for display.

use chrono::{DateTime, NaiveDate};

use crate::model::DateRange;

/// Formats a number with `,` thousands grouping and at most two fraction
/// digits, trailing zeros trimmed. Non-finite values format as `""`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let fixed = format!("{:.2}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && fixed != "0.00" {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Parses an ISO date or RFC 3339 datetime, keeping only the calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|datetime| datetime.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

/// Long date, e.g. `March 5, 2024`; `""` when the input is not a date.
pub fn format_date(raw: &str) -> String {
    parse_date(raw)
        .map(|date| date.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

/// `start → end`, or just `start` when the range has no end.
pub fn format_date_range(range: &DateRange) -> String {
    let start = format_date(&range.start);
    if start.is_empty() {
        return start;
    }
    match range.end.as_deref().map(format_date) {
        Some(end) if !end.is_empty() => format!("{start} → {end}"),
        _ => start,
    }
}

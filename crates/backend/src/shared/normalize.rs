//! Normalization helpers shared by every dashboard calculator.
//!
//! All of them are total: malformed input degrades to an empty key, a zero or
//! a fallback label, never to a panic or a `NaN`.

use chrono::NaiveDate;
use std::collections::HashSet;

pub use contracts::domain::common::to_number;

/// Display scale for money: 1 lakh = 100,000 rupees
pub const LAKH: f64 = 100_000.0;

/// Month key of an ISO-like date: its first 7 characters ("YYYY-MM").
///
/// No calendar validation happens here. A malformed date yields a garbage key
/// that simply matches no real month bucket.
pub fn month_key(date: &str) -> &str {
    match date.char_indices().nth(7) {
        Some((idx, _)) => &date[..idx],
        None => date,
    }
}

/// Human label for a month key, e.g. "2025-12" -> "December 2025".
/// Keys that do not name a real month are returned as-is.
pub fn month_label(key: &str) -> String {
    key.split_once('-')
        .and_then(|(year, month)| {
            let year = year.parse::<i32>().ok()?;
            let month = month.parse::<u32>().ok()?;
            NaiveDate::from_ymd_opt(year, month, 1)
        })
        .map(|first| first.format("%B %Y").to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Parses the date part of an ISO date string.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    let head = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Treats a missing or non-finite amount as zero.
///
/// A genuine `0` and a missing value are indistinguishable afterwards; sums
/// do not need the difference.
pub fn or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// True for a present, finite, non-zero amount
pub fn is_truthy(value: Option<f64>) -> bool {
    or_zero(value) != 0.0
}

/// Sums `selector` over `records`; missing values contribute zero.
pub fn sum_by<T>(records: &[T], selector: impl Fn(&T) -> Option<f64>) -> f64 {
    records.iter().map(|r| or_zero(selector(r))).sum()
}

/// Converts a raw rupee amount to lakh. Apply once, to the final sum.
pub fn to_lakh(amount: f64) -> f64 {
    amount / LAKH
}

/// Status is exactly "complete", ignoring case
pub fn is_complete(status: &str) -> bool {
    status.to_lowercase() == "complete"
}

/// Status is exactly "incomplete", ignoring case.
///
/// Not the negation of [`is_complete`]: an empty or "cancelled" status is
/// neither.
pub fn is_incomplete(status: &str) -> bool {
    status.to_lowercase() == "incomplete"
}

/// Number of distinct non-empty identifiers
pub fn distinct_count<'a>(ids: impl IntoIterator<Item = &'a str>) -> usize {
    ids.into_iter()
        .filter(|id| !id.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

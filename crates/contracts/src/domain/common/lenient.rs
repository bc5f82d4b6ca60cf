//! Lenient field deserializers for ledger records.
//!
//! Spreadsheet exports are dirty: numbers arrive as strings, empty cells as
//! `null`, pandas leaves `"nan"` behind in text columns and dates may carry a
//! time part or a day-first layout. These helpers accept any JSON value and
//! never fail, so one bad cell cannot reject a whole ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text placeholders that mean "no value".
const EMPTY_MARKERS: [&str; 5] = ["nan", "none", "nat", "null", "undefined"];

/// Day-first and slash layouts accepted besides ISO `YYYY-MM-DD`.
const DATE_LAYOUTS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Renders any JSON value as trimmed text; placeholders become `""`.
pub fn value_to_string(value: &Value) -> String {
    let text = match value {
        Value::Null => return String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => match n.as_f64() {
            // 4501.0 and 4501 name the same PO
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    };
    if EMPTY_MARKERS
        .iter()
        .any(|marker| text.eq_ignore_ascii_case(marker))
    {
        String::new()
    } else {
        text
    }
}

/// Parses a numeric cell. Thousands separators are tolerated; anything that
/// does not yield a finite number is `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numeric view of a JSON value, `None` when it is not a finite number.
pub fn value_to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_number(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Coerces any value to a number, defaulting to `0.0`.
pub fn to_number(value: &Value) -> f64 {
    value_to_number(value).unwrap_or(0.0)
}

/// Normalizes a date cell to `YYYY-MM-DD`.
///
/// Time parts (`T...` or ` hh:mm:ss`) are dropped. Text that matches none of
/// the known layouts is returned trimmed and untouched; month bucketing then
/// fails to match it instead of guessing.
pub fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);

    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(date_part, layout).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(value_to_string).unwrap_or_default())
}

pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = string(deserializer)?;
    Ok(if text.is_empty() { None } else { Some(text) })
}

pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_number))
}

pub fn date<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = string(deserializer)?;
    Ok(if text.is_empty() {
        text
    } else {
        normalize_date(&text)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_string_placeholders() {
        assert_eq!(value_to_string(&json!("  PO-1 ")), "PO-1");
        assert_eq!(value_to_string(&json!("nan")), "");
        assert_eq!(value_to_string(&json!("NaT")), "");
        assert_eq!(value_to_string(&json!(null)), "");
        assert_eq!(value_to_string(&json!(4501)), "4501");
        assert_eq!(value_to_string(&json!(4501.0)), "4501");
        assert_eq!(value_to_string(&json!(12.5)), "12.5");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("1,25,000"), Some(125000.0));
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_to_number_defaults_to_zero() {
        assert_eq!(to_number(&json!("12")), 12.0);
        assert_eq!(to_number(&json!(null)), 0.0);
        assert_eq!(to_number(&json!({"a": 1})), 0.0);
        assert_eq!(to_number(&json!("n/a")), 0.0);
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("2025-12-20"), "2025-12-20");
        assert_eq!(normalize_date("2025-12-20T00:00:00"), "2025-12-20");
        assert_eq!(normalize_date("2025-12-20 10:15:00"), "2025-12-20");
        assert_eq!(normalize_date("20-12-2025"), "2025-12-20");
        assert_eq!(normalize_date("20/12/2025"), "2025-12-20");
        assert_eq!(normalize_date("sometime"), "sometime");
    }
}

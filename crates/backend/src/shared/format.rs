//! Number formatting for the text summary

/// Groups an unsigned digit string the Indian way: last three digits, then
/// pairs ("1234567" -> "12,34,567")
fn group_indian(digits: &str) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
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

/// Formats a number with Indian digit grouping and the given decimals
///
/// # Examples
/// ```
/// use backend::shared::format::format_indian;
/// assert_eq!(format_indian(1234567.0, 0), "12,34,567");
/// assert_eq!(format_indian(-98765.432, 2), "-98,765.43");
/// ```
pub fn format_indian(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    let grouped = group_indian(integer_part);
    match decimal_part {
        Some(d) => format!("{sign}{grouped}.{d}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn format_count(n: usize) -> String {
    group_indian(&n.to_string())
}

/// Lakh amount as shown on the KPI cards
///
/// # Examples
/// ```
/// use backend::shared::format::format_lakh;
/// assert_eq!(format_lakh(12.3456), "12.35 L");
/// ```
pub fn format_lakh(lakh: f64) -> String {
    format!("{} L", format_indian(lakh, 2))
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_indian() {
        assert_eq!(format_indian(0.0, 0), "0");
        assert_eq!(format_indian(999.0, 0), "999");
        assert_eq!(format_indian(1000.0, 0), "1,000");
        assert_eq!(format_indian(100000.0, 0), "1,00,000");
        assert_eq!(format_indian(1234567.0, 0), "12,34,567");
        assert_eq!(format_indian(123456789.0, 0), "12,34,56,789");
        assert_eq!(format_indian(1234.5, 2), "1,234.50");
        assert_eq!(format_indian(-1234567.891, 2), "-12,34,567.89");
        assert_eq!(format_indian(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_indian_whole_quantities() {
        assert_eq!(format_indian(1234.6, 0), "1,235");
        assert_eq!(format_indian(250000.4, 0), "2,50,000");
        assert_eq!(format_indian(-40.0, 0), "-40");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(42), "42");
        assert_eq!(format_count(1234567), "12,34,567");
    }

    #[test]
    fn test_format_lakh_and_percent() {
        assert_eq!(format_lakh(0.0), "0.00 L");
        assert_eq!(format_lakh(1523.4), "1,523.40 L");
        assert_eq!(format_percent(66.666), "66.7%");
    }
}

//! Display formatting. Values are rounded here and nowhere else.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Insert a comma every three digits ("1234567" -> "1,234,567")
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fixed number of fraction digits with a grouped whole part
fn format_fixed(value: f64, digits: usize) -> String {
    let rounded = format!("{:.*}", digits, value);
    let (whole, frac) = match rounded.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (rounded.as_str(), None),
    };

    let negative = whole.starts_with('-');
    let grouped = group_digits(whole.trim_start_matches('-'));
    let sign = if negative && rounded.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Money: two fraction digits ("9,600.00")
pub fn format_currency(amount: f64) -> String {
    format_fixed(amount, 2)
}

/// Unit price: five fraction digits ("3.20000")
pub fn format_unit_price(price: f64) -> String {
    format_fixed(price, 5)
}

/// Quantity: grouped, at most three fraction digits, no trailing zeros ("3,000", "12.5")
pub fn format_number(num: f64) -> String {
    let fixed = format_fixed(num, 3);
    match fixed.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                whole.to_string()
            } else {
                format!("{whole}.{frac}")
            }
        }
        None => fixed,
    }
}

/// Prefix a formatted amount with the currency symbol ("$ 9,600.00")
pub fn with_symbol(symbol: &str, formatted: &str) -> String {
    format!("{symbol} {formatted}")
}

/// Parse an ISO date or date-time
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// "YYYY.MM.DD"; unparseable input is returned verbatim
pub fn format_date(value: &str) -> String {
    parse_date(value)
        .map(|d| d.format("%Y.%m.%d").to_string())
        .unwrap_or_else(|| value.to_string())
}

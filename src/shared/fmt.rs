//! Number formatting utilities for human-readable display.
//!
//! Used for rendering prices and the financial metrics attached to
//! [`StockInfo`](crate::domain::stock::StockInfo).

/// Trims trailing zeros, adds thousands separators.
pub fn display_formatted_string(formatted: String) -> String {
    let trimmed = if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    };

    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

fn get_decimal_places(value: f64) -> usize {
    let abs_value = value.abs();

    if abs_value >= 100.0 {
        return 0;
    }

    if abs_value >= 1.0 || abs_value == 0.0 {
        return 2;
    }

    let exponent = abs_value.log10().floor().abs() as usize;
    (exponent + 2).min(8)
}

/// Format an f64 for display with auto-detected decimal places.
pub fn display(amount: f64) -> String {
    display_with_decimals(amount, get_decimal_places(amount))
}

/// Format an f64 for display with explicit decimal places.
pub fn display_with_decimals(amount: f64, decimals: usize) -> String {
    if !amount.is_finite() {
        return "-".to_string();
    }
    let formatted = format!("{:.1$}", amount, decimals);
    display_formatted_string(formatted)
}

/// Abbreviate large magnitudes with a K/M/B/T suffix (`2.5T`, `310.2B`).
///
/// Values below one thousand fall back to [`display`].
pub fn compact(amount: f64) -> String {
    const SUFFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

    if !amount.is_finite() {
        return "-".to_string();
    }
    let abs = amount.abs();
    for (scale, suffix) in SUFFIXES {
        if abs >= scale {
            return format!("{}{}", display_with_decimals(amount / scale, 1), suffix);
        }
    }
    display(amount)
}

/// Format a ratio (`0.0123`) as a percentage (`1.23%`).
pub fn percent(ratio: f64) -> String {
    format!("{}%", display_with_decimals(ratio * 100.0, 2))
}

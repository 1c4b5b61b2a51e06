//! Currency text helpers shared by the scraper and report rendering.

/// Parse a currency string (`"$4,200/mo"`, `"368"`) into a number.
///
/// Strips everything outside digits and the decimal point before parsing.
/// Returns `None` for empty or malformed input.
pub fn parse_currency(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format a dollar amount with thousands separators and no cents
/// (`-7000.4` → `"-$7,000"`). Used for prices and lump sums.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.abs().round() as i64;
    let grouped = group_thousands(rounded);
    if amount < 0.0 && rounded > 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Format a dollar amount with cents (`1690.9012` → `"$1,690.90"`).
/// Used for monthly payment figures.
pub fn format_monthly(amount: f64) -> String {
    let total_cents = (amount.abs() * 100.0).round() as i64;
    let dollars = group_thousands(total_cents / 100);
    let cents = total_cents % 100;
    if amount < 0.0 && total_cents > 0 {
        format!("-${dollars}.{cents:02}")
    } else {
        format!("${dollars}.{cents:02}")
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

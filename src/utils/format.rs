/// Group the digits of a non-negative integer with commas: 1234567 -> "1,234,567"
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a price as whole yen with thousands grouping: 3420.6 -> "¥3,421"
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    if rounded < 0.0 {
        format!("-¥{}", group_thousands(rounded.abs() as u64))
    } else {
        format!("¥{}", group_thousands(rounded as u64))
    }
}

/// Format a price change with an explicit sign for non-negative values.
/// The sign goes before the currency mark: +¥10 / -¥10
pub fn format_signed_currency(change: f64) -> String {
    let rounded = change.round();
    if rounded < 0.0 {
        format!("-¥{}", group_thousands(rounded.abs() as u64))
    } else {
        format!("+¥{}", group_thousands(rounded as u64))
    }
}

/// Format a percentage to two decimal places: 10.0 -> "10.00%"
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

//! Human-readable number formatting for dashboard labels

/// Render a count in millions with two decimals, e.g. `2.07M`
pub fn format_millions(value: u64) -> String {
    format!("{:.2}M", value as f64 / 1_000_000.0)
}

/// Render a count in thousands with one decimal, e.g. `12.3K`
pub fn format_thousands(value: u64) -> String {
    format!("{:.1}K", value as f64 / 1_000.0)
}

/// Render an integer with comma thousands separators, e.g. `1,234,567`
pub fn format_with_commas(value: u64) -> String {
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

/// Round half away from zero to a fixed number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

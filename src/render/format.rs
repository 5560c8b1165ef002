//! Small text helpers shared by the fragments.

/// Escape text for interpolation into element content or a quoted attribute.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `90` → `1h 30m`, `45` → `45m`.
pub fn format_duration(minutes: u16) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// Share of `weight` in `total` as a percentage with one decimal.
pub fn probability(weight: u8, total: u32) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", f64::from(weight) / f64::from(total) * 100.0)
}

/// Left-border colour band by weight.
pub fn weight_band(weight: u8) -> &'static str {
    match weight {
        8..=u8::MAX => "border-l-4 border-l-green-500",
        5..=7 => "border-l-4 border-l-yellow-500",
        _ => "border-l-4 border-l-red-500",
    }
}

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Divisor the metrics server's memory figures are scaled by for the GiB readout.
pub const GIB_DIVISOR: f64 = 1_024_000.0;
/// Divisor for network counters shown in KB.
pub const KB_DIVISOR: f64 = 1_000.0;

pub fn text_width(value: &str) -> usize {
    UnicodeWidthStr::width(value)
}

pub fn gib(value: u64) -> f64 {
    value as f64 / GIB_DIVISOR
}

pub fn format_gib(value: u64) -> String {
    format!("{:.2} GiB", gib(value))
}

pub fn format_kb(value: u64) -> String {
    format!("{:.2} KB", value as f64 / KB_DIVISOR)
}

pub fn fit_text(value: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if text_width(value) <= max_len {
        return value.to_string();
    }
    if max_len <= 3 {
        return take_width(value, max_len);
    }
    let mut trimmed = take_width(value, max_len - 3);
    trimmed.push_str("...");
    trimmed
}

pub fn take_width(value: &str, max_len: usize) -> String {
    let mut output = String::new();
    let mut width = 0;
    for ch in value.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > max_len {
            break;
        }
        output.push(ch);
        width += ch_width;
    }
    output
}

/// `None` when `total` is zero, so callers can print a placeholder instead of NaN.
pub fn percent(used: u64, total: u64) -> Option<f64> {
    (total > 0).then(|| used as f64 / total as f64 * 100.0)
}

pub fn render_bar(pct: f64, width: usize) -> String {
    let width = width.max(1);
    let pct = if pct.is_finite() {
        pct.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    let empty = width - filled;
    format!("{}{}", "=".repeat(filled), ".".repeat(empty))
}

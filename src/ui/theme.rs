//! Colors and the few composite styles shared across panels.

use ratatui::style::{Color, Modifier, Style};

use crate::app::StatusLevel;

pub const COLOR_ACCENT: Color = Color::Rgb(78, 190, 210);
pub const COLOR_MUTED: Color = Color::Rgb(138, 148, 158);
pub const COLOR_BORDER: Color = Color::Rgb(78, 86, 96);
pub const COLOR_GOOD: Color = Color::Rgb(95, 200, 120);
pub const COLOR_WARN: Color = Color::Rgb(230, 180, 70);
pub const COLOR_HOT: Color = Color::Rgb(230, 90, 70);
pub const COLOR_SELECTED_BG: Color = Color::Rgb(40, 48, 58);

/// Bar and percentage color for a usage reading; out-of-range or NaN reads as idle.
pub fn color_for_percent(pct: f64) -> Color {
    match pct {
        pct if pct >= 80.0 => COLOR_HOT,
        pct if pct >= 50.0 => COLOR_WARN,
        _ => COLOR_GOOD,
    }
}

pub fn status_style(level: StatusLevel) -> Style {
    match level {
        StatusLevel::Info => Style::default().fg(COLOR_GOOD),
        StatusLevel::Warn => Style::default()
            .fg(COLOR_WARN)
            .add_modifier(Modifier::BOLD),
    }
}

/// Badge appended to a panel title while its endpoint is failing.
pub fn stale_badge_style() -> Style {
    Style::default()
        .fg(COLOR_WARN)
        .add_modifier(Modifier::BOLD)
}

/// Process table header cell; the sorted column stands out.
pub fn column_header_style(active: bool) -> Style {
    let fg = if active { COLOR_ACCENT } else { COLOR_MUTED };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_colors_step_at_thresholds() {
        assert_eq!(color_for_percent(0.0), COLOR_GOOD);
        assert_eq!(color_for_percent(49.9), COLOR_GOOD);
        assert_eq!(color_for_percent(50.0), COLOR_WARN);
        assert_eq!(color_for_percent(80.0), COLOR_HOT);
        assert_eq!(color_for_percent(f64::NAN), COLOR_GOOD);
    }

    #[test]
    fn active_header_is_accented() {
        assert_eq!(column_header_style(true).fg, Some(COLOR_ACCENT));
        assert_eq!(column_header_style(false).fg, Some(COLOR_MUTED));
    }
}

use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::panel_block;
use super::theme::{COLOR_ACCENT, COLOR_MUTED, COLOR_WARN};
use crate::app::App;
use crate::data::MetricKind;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default()
        .fg(COLOR_ACCENT)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default()
        .fg(COLOR_MUTED)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(COLOR_ACCENT);

    let first_line = Line::from(vec![
        Span::styled("webtop", title_style),
        Span::raw("  "),
        Span::styled("server ", label_style),
        Span::styled(app.server_url.as_str(), Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled("tick ", label_style),
        Span::styled(app.last_tick().to_string(), value_style),
    ]);

    let mut second_line = vec![
        Span::styled("sort ", label_style),
        Span::styled(app.sort.label(), value_style),
        Span::raw("  "),
        Span::styled("resort ", label_style),
        Span::styled(app.resort_source.label(), value_style),
        Span::raw("  "),
        Span::styled("view ", label_style),
        Span::styled(app.view_mode.label(), value_style),
    ];
    let failing = failing_panels(app);
    if !failing.is_empty() {
        second_line.push(Span::raw("  "));
        second_line.push(Span::styled("failing ", label_style));
        second_line.push(Span::styled(failing.join(" "), Style::default().fg(COLOR_WARN)));
    }

    let paragraph =
        Paragraph::new(vec![first_line, Line::from(second_line)]).block(panel_block("Summary"));
    frame.render_widget(paragraph, area);
}

fn failing_panels(app: &App) -> Vec<&'static str> {
    MetricKind::ALL
        .into_iter()
        .filter(|kind| app.panel_meta(*kind).is_stale())
        .map(MetricKind::path)
        .collect()
}

use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_MUTED, status_style};
use crate::app::App;

const HINTS: [(&str, &str); 8] = [
    ("q", "quit"),
    ("r", "refresh"),
    ("tab", "view"),
    ("up/down", "move"),
    ("left/right", "column"),
    ("space", "order"),
    ("1-6", "sort"),
    ("click", "header"),
];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(status) = app.status.as_ref() {
        Line::from(Span::styled(status.text.as_str(), status_style(status.level)))
    } else {
        let key_style = Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD);
        let hint_style = Style::default().fg(COLOR_MUTED);
        let spans = HINTS
            .iter()
            .flat_map(|(key, hint)| {
                [
                    Span::styled(*key, key_style),
                    Span::styled(format!(" {hint}  "), hint_style),
                ]
            })
            .collect::<Vec<_>>();
        Line::from(spans)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER));
    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}

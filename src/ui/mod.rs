mod footer;
mod header;
mod panels;
mod processes;
pub mod theme;

use std::time::Instant;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, PanelMeta, ViewMode};
use theme::{COLOR_BORDER, stale_badge_style};

const MIN_WIDTH: u16 = 80;
const MIN_HEIGHT: u16 = 24;
const HEADER_HEIGHT: u16 = 4;
const FOOTER_HEIGHT: u16 = 3;

pub fn render(frame: &mut Frame, app: &mut App) {
    app.process_header_regions.clear();
    app.process_body = None;
    let size = frame.area();
    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        let msg = Paragraph::new(format!(
            "Terminal too small. Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}."
        ))
        .block(panel_block("webtop"))
        .alignment(Alignment::Center);
        frame.render_widget(msg, size);
        return;
    }

    match app.view_mode {
        ViewMode::Overview => render_overview(frame, app, size),
        ViewMode::Processes => render_processes_only(frame, app, size),
    }
}

pub fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title_style(
            Style::default()
                .fg(theme::COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )
}

/// Panel block whose title carries a staleness badge after a failed fetch.
pub fn panel_block_with_meta<'a>(title: &'a str, meta: &PanelMeta, now: Instant) -> Block<'a> {
    let block = panel_block(title);
    match meta.stale_label(now) {
        Some(badge) => block.title(Line::from(Span::styled(
            format!(" {badge} "),
            stale_badge_style(),
        ))),
        None => block,
    }
}

fn render_overview(frame: &mut Frame, app: &mut App, size: Rect) {
    let now = Instant::now();
    let cpu_rows = app
        .cpu
        .value()
        .map(|stats| {
            u16::try_from(stats.cpu_usage.len())
                .unwrap_or(u16::MAX)
                .saturating_add(2)
        })
        .unwrap_or(1);
    let available = size
        .height
        .saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT + 8);
    let stats_height = cpu_rows.max(7).saturating_add(2).min(available / 2).max(5);
    let lower_height = available.saturating_sub(stats_height).clamp(3, 6);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(stats_height),
            Constraint::Length(lower_height),
            Constraint::Min(8),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(size);

    header::render(frame, chunks[0], app);

    let stats = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(chunks[1]);
    panels::render_cpu(frame, stats[0], app, now);
    panels::render_memory(frame, stats[1], app, now);
    panels::render_system(frame, stats[2], app, now);

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    panels::render_networks(frame, lower[0], app, now);
    panels::render_gpus(frame, lower[1], app, now);

    processes::render(frame, chunks[3], app, now);
    footer::render(frame, chunks[4], app);
}

fn render_processes_only(frame: &mut Frame, app: &mut App, size: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(8),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(size);

    header::render(frame, chunks[0], app);
    processes::render(frame, chunks[1], app, Instant::now());
    footer::render(frame, chunks[2], app);
}

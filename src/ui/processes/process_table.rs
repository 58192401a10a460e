use std::time::Instant;

use ratatui::prelude::*;
use ratatui::widgets::{Cell, Row, Table, TableState};

use super::super::panel_block_with_meta;
use super::super::theme::{COLOR_SELECTED_BG, column_header_style};
use crate::app::{App, HeaderRegion};
use crate::data::{COLUMN_COUNT, ColumnId, ColumnKind, ColumnSpec, PROCESS_COLUMNS, SortDir};
use crate::utils::fit_text;

const COLUMN_SPACING: u16 = 1;
const MIN_NAME_WIDTH: u16 = 10;

pub fn render(frame: &mut Frame, area: Rect, app: &mut App, now: Instant) {
    let title = format!("Processes ({})", app.table.len());
    let block = panel_block_with_meta(&title, &app.process_meta, now);
    let inner = block.inner(area);
    update_process_header_regions(app, inner);
    app.process_body = if inner.width > 0 && inner.height > 1 {
        Some(Rect {
            x: inner.x,
            y: inner.y.saturating_add(1),
            width: inner.width,
            height: inner.height.saturating_sub(1),
        })
    } else {
        None
    };
    let name_width = app
        .process_header_regions
        .iter()
        .find(|region| region.column == ColumnId::Name)
        .map(|region| region.rect.width as usize)
        .unwrap_or(0)
        .max(1);

    let max_rows = app
        .process_body
        .map(|rect| rect.height as usize)
        .unwrap_or(0);
    app.ensure_visible(max_rows);

    let rows = app.table.rows();
    let start = app.scroll.min(rows.len());
    let end = (start + max_rows).min(rows.len());
    let visible_rows = if start < end { &rows[start..end] } else { &[] };

    let table_rows = visible_rows
        .iter()
        .map(|row| {
            Row::new(PROCESS_COLUMNS.iter().map(|spec| {
                let text = row.cell(spec.id);
                match spec.id {
                    ColumnId::Name => Cell::from(fit_text(text, name_width)),
                    _ if spec.kind == ColumnKind::Numeric => {
                        Cell::from(Line::from(text.to_string()).alignment(Alignment::Right))
                    }
                    _ => Cell::from(text.to_string()),
                }
            }))
        })
        .collect::<Vec<_>>();

    let header = Row::new(PROCESS_COLUMNS.iter().map(|spec| header_cell(app, spec)));

    let table = Table::new(table_rows, column_constraints())
        .header(header)
        .block(block)
        .column_spacing(COLUMN_SPACING)
        .row_highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(COLOR_SELECTED_BG)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    if let Some(selected) = app.table_state.selected()
        && selected >= start
        && selected < end
    {
        state.select(Some(selected - start));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn column_constraints() -> [Constraint; COLUMN_COUNT] {
    PROCESS_COLUMNS.map(|spec| match spec.width {
        0 => Constraint::Min(MIN_NAME_WIDTH),
        width => Constraint::Length(width),
    })
}

fn header_cell(app: &App, spec: &ColumnSpec) -> Cell<'static> {
    let active = app.sort.is_active(spec.id);
    let indicator = match app.sort.dir() {
        Some(SortDir::Asc) if active => "^",
        Some(SortDir::Desc) if active => "v",
        _ => " ",
    };

    Cell::from(format!("{}{indicator}", spec.label)).style(column_header_style(active))
}

/// Click targets for the header row, laid out the same way the table splits
/// its columns.
fn update_process_header_regions(app: &mut App, inner: Rect) {
    app.process_header_regions = header_regions(inner);
}

fn header_regions(inner: Rect) -> Vec<HeaderRegion> {
    if inner.width == 0 || inner.height == 0 {
        return Vec::new();
    }

    let constraints = column_constraints();
    let total_spacing = COLUMN_SPACING.saturating_mul(constraints.len().saturating_sub(1) as u16);
    let layout_width = inner.width.saturating_sub(total_spacing);
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(Rect {
            x: 0,
            y: 0,
            width: layout_width,
            height: 1,
        });

    let mut regions = Vec::with_capacity(constraints.len());
    let mut x = inner.x;
    for (spec, rect) in PROCESS_COLUMNS.iter().zip(layout.iter()) {
        regions.push(HeaderRegion {
            column: spec.id,
            rect: Rect {
                x,
                y: inner.y,
                width: rect.width,
                height: 1,
            },
        });
        x = x.saturating_add(rect.width + COLUMN_SPACING);
    }
    regions
}

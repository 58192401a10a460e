use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::types::{AppEvent, EventResult};
use crate::app::App;
use crate::data::ColumnId;

/// Handle an application event
pub fn handle_event(app: &mut App, event: AppEvent) -> EventResult {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Tick => {
            app.tick();
            EventResult::Refresh
        }
        AppEvent::Fetched(outcome) => {
            app.apply_fetch(outcome);
            EventResult::Continue
        }
        AppEvent::Resize(_, _) => {
            // UI will handle resize automatically
            EventResult::Continue
        }
        AppEvent::Quit => EventResult::Exit,
    }
}

/// Handle a key event, returns EventResult
pub fn handle_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => EventResult::Exit,
        KeyCode::Char('q') | KeyCode::Esc => EventResult::Exit,
        KeyCode::Up => {
            app.move_selection(-1);
            EventResult::Continue
        }
        KeyCode::Down => {
            app.move_selection(1);
            EventResult::Continue
        }
        KeyCode::PageUp => {
            app.move_selection(-(app.page_size() as i32));
            EventResult::Continue
        }
        KeyCode::PageDown => {
            app.move_selection(app.page_size() as i32);
            EventResult::Continue
        }
        KeyCode::Home => {
            app.select_first();
            EventResult::Continue
        }
        KeyCode::End => {
            app.select_last();
            EventResult::Continue
        }
        KeyCode::Left => {
            app.activate_prev_column();
            EventResult::Continue
        }
        KeyCode::Right => {
            app.activate_next_column();
            EventResult::Continue
        }
        KeyCode::Char(' ') => {
            app.activate_current_column();
            EventResult::Continue
        }
        KeyCode::Char(digit @ '1'..='6') => {
            let index = digit as usize - '1' as usize;
            if let Some(column) = ColumnId::from_index(index) {
                app.activate_column(column);
            }
            EventResult::Continue
        }
        KeyCode::Char(ch) if column_shortcut(ch).is_some() => {
            if let Some(column) = column_shortcut(ch) {
                app.activate_column(column);
            }
            EventResult::Continue
        }
        KeyCode::Char('r') => EventResult::Refresh,
        KeyCode::Tab => {
            app.cycle_view_mode();
            EventResult::Continue
        }
        _ => EventResult::Continue,
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(column) = app.column_for_header_click(mouse.column, mouse.row) {
                app.activate_column(column);
            } else if let Some(index) = app.process_row_at(mouse.column, mouse.row) {
                app.select_process_row(index);
            }
        }
        MouseEventKind::ScrollUp => app.move_selection(-3),
        MouseEventKind::ScrollDown => app.move_selection(3),
        _ => {}
    }
    EventResult::Continue
}

fn column_shortcut(ch: char) -> Option<ColumnId> {
    match ch {
        'p' => Some(ColumnId::Pid),
        'n' => Some(ColumnId::Name),
        'c' => Some(ColumnId::CpuUsage),
        'm' => Some(ColumnId::Memory),
        's' => Some(ColumnId::Status),
        't' => Some(ColumnId::RunTime),
        _ => None,
    }
}

use super::App;

impl App {
    /// Keeps the highlighted process on the same pid after the rows move.
    pub(super) fn sync_selection(&mut self) {
        if self.table.is_empty() {
            self.table_state.select(None);
            self.selected_pid = None;
            self.scroll = 0;
            return;
        }

        let selected_idx = self
            .selected_pid
            .and_then(|pid| self.table.position_of(pid))
            .or_else(|| self.table_state.selected())
            .filter(|&idx| idx < self.table.len())
            .unwrap_or(0);

        self.select_index(selected_idx);
    }

    pub fn move_selection(&mut self, delta: i32) {
        if self.table.is_empty() {
            self.table_state.select(None);
            self.selected_pid = None;
            return;
        }

        let current = self.table_state.selected().unwrap_or(0);
        let len = self.table.len();
        let new_index = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (current + delta as usize).min(len.saturating_sub(1))
        };

        self.select_index(new_index);
    }

    pub fn select_first(&mut self) {
        self.select_process_row(0);
    }

    pub fn select_last(&mut self) {
        self.select_process_row(self.table.len().saturating_sub(1));
    }

    pub fn select_process_row(&mut self, index: usize) {
        if self.table.is_empty() {
            self.table_state.select(None);
            self.selected_pid = None;
            return;
        }

        let idx = index.min(self.table.len().saturating_sub(1));
        self.select_index(idx);
    }

    /// Row index under a click inside the table body, if any.
    pub fn process_row_at(&self, column: u16, row: u16) -> Option<usize> {
        let body = self.process_body?;
        let inside = column >= body.x
            && column < body.x.saturating_add(body.width)
            && row >= body.y
            && row < body.y.saturating_add(body.height);
        if !inside {
            return None;
        }
        let idx = self.scroll + usize::from(row - body.y);
        (idx < self.table.len()).then_some(idx)
    }

    pub fn page_size(&self) -> usize {
        self.process_body
            .map(|rect| rect.height as usize)
            .unwrap_or(10)
            .max(1)
    }

    pub fn ensure_visible(&mut self, max_rows: usize) {
        if max_rows == 0 {
            return;
        }
        if let Some(selected) = self.table_state.selected() {
            if selected < self.scroll {
                self.scroll = selected;
            } else if selected >= self.scroll + max_rows {
                self.scroll = selected + 1 - max_rows;
            }
        }
        let max_scroll = self.table.len().saturating_sub(max_rows);
        if self.scroll > max_scroll {
            self.scroll = max_scroll;
        }
    }

    fn select_index(&mut self, idx: usize) {
        self.table_state.select(Some(idx));
        self.selected_pid = self.table.rows().get(idx).and_then(|row| row.pid());
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use ratatui::prelude::Rect;

    use crate::app::{App, Config};
    use crate::data::{ColumnId, ProcessRecord, ResortSource, SortState};

    fn app_with_rows() -> App {
        let mut app = App::new(&Config {
            server_url: "http://127.0.0.1:3000".to_string(),
            tick_rate: Duration::from_millis(1000),
            request_timeout: Duration::from_millis(5000),
            status_ttl: Duration::from_secs(3),
            sort: SortState::unsorted(),
            resort_source: ResortSource::Records,
            log_level: "info".to_string(),
            log_file: PathBuf::from("/tmp/webtop.log"),
        });
        let records = vec![
            ProcessRecord::new(3).with_name("c"),
            ProcessRecord::new(1).with_name("a"),
            ProcessRecord::new(2).with_name("b"),
        ];
        app.table.replace(records, &app.sort);
        app.sync_selection();
        app
    }

    #[test]
    fn selection_follows_pid_across_resort() {
        let mut app = app_with_rows();
        app.move_selection(1);
        assert_eq!(app.selected_pid, Some(1));

        app.activate_column(ColumnId::Name);
        assert_eq!(app.selected_pid, Some(1));
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn move_selection_clamps() {
        let mut app = app_with_rows();
        app.move_selection(-5);
        assert_eq!(app.table_state.selected(), Some(0));
        app.move_selection(10);
        assert_eq!(app.table_state.selected(), Some(2));
        assert_eq!(app.selected_pid, Some(2));
        app.select_first();
        assert_eq!(app.selected_pid, Some(3));
    }

    #[test]
    fn click_in_body_maps_to_row() {
        let mut app = app_with_rows();
        app.process_body = Some(Rect::new(1, 10, 40, 2));
        app.scroll = 1;
        assert_eq!(app.process_row_at(5, 10), Some(1));
        assert_eq!(app.process_row_at(5, 11), Some(2));
        assert_eq!(app.process_row_at(5, 12), None);
        assert_eq!(app.process_row_at(0, 10), None);
    }

    #[test]
    fn ensure_visible_scrolls_to_selection() {
        let mut app = app_with_rows();
        app.select_last();
        app.ensure_visible(2);
        assert_eq!(app.scroll, 1);
    }
}

mod panels;
mod selection;

use std::time::Duration;

use ratatui::prelude::Rect;
use ratatui::widgets::TableState;
use tracing::info;

pub use panels::{Panel, PanelMeta};

use super::config::Config;
use super::status::{StatusLevel, StatusMessage};
use super::view_mode::ViewMode;
use crate::data::{
    ColumnId, CpuStats, GpuStats, MemoryStats, NetworkInterface, ProcessTable, ResortSource,
    SortState, SystemInfo,
};

#[derive(Clone, Copy, Debug)]
pub struct HeaderRegion {
    pub column: ColumnId,
    pub rect: Rect,
}

pub struct App {
    pub server_url: String,
    pub sort: SortState,
    pub resort_source: ResortSource,
    pub table: ProcessTable,
    pub process_meta: PanelMeta,
    pub cpu: Panel<CpuStats>,
    pub memory: Panel<MemoryStats>,
    pub system: Panel<SystemInfo>,
    pub networks: Panel<Vec<NetworkInterface>>,
    pub gpus: Panel<Vec<GpuStats>>,
    pub table_state: TableState,
    pub selected_pid: Option<u32>,
    pub scroll: usize,
    pub process_body: Option<Rect>,
    pub process_header_regions: Vec<HeaderRegion>,
    pub status: Option<StatusMessage>,
    pub view_mode: ViewMode,
    status_ttl: Duration,
    last_tick: u64,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            server_url: config.server_url.clone(),
            sort: config.sort,
            resort_source: config.resort_source,
            table: ProcessTable::default(),
            process_meta: PanelMeta::default(),
            cpu: Panel::default(),
            memory: Panel::default(),
            system: Panel::default(),
            networks: Panel::default(),
            gpus: Panel::default(),
            table_state: TableState::default(),
            selected_pid: None,
            scroll: 0,
            process_body: None,
            process_header_regions: Vec::new(),
            status: None,
            view_mode: ViewMode::default(),
            status_ttl: config.status_ttl,
            last_tick: 0,
        }
    }

    /// Sequence number for the next poll tick.
    pub fn next_tick(&mut self) -> u64 {
        self.last_tick += 1;
        self.last_tick
    }

    pub fn last_tick(&self) -> u64 {
        self.last_tick
    }

    pub fn tick(&mut self) {
        self.clear_expired_status();
    }

    /// Header activation: update the sort state and re-sort what is on
    /// screen right away, without waiting for the next poll.
    pub fn activate_column(&mut self, column: ColumnId) {
        self.sort.activate(column);
        self.table.resort(&self.sort, self.resort_source);
        self.sync_selection();
        info!(sort = %self.sort.label(), source = self.resort_source.label(), "process sort changed");
        self.set_status(StatusLevel::Info, format!("sorted by {}", self.sort.label()));
    }

    /// Re-activates the active column, i.e. flips its direction.
    pub fn activate_current_column(&mut self) {
        if let Some(column) = self.sort.column() {
            self.activate_column(column);
        }
    }

    pub fn activate_next_column(&mut self) {
        let column = self
            .sort
            .column()
            .map(ColumnId::next)
            .unwrap_or(ColumnId::Pid);
        self.activate_column(column);
    }

    pub fn activate_prev_column(&mut self) {
        let column = self
            .sort
            .column()
            .map(ColumnId::prev)
            .unwrap_or(ColumnId::RunTime);
        self.activate_column(column);
    }

    pub fn column_for_header_click(&self, column: u16, row: u16) -> Option<ColumnId> {
        self.process_header_regions
            .iter()
            .find(|region| {
                row >= region.rect.y
                    && row < region.rect.y.saturating_add(region.rect.height)
                    && column >= region.rect.x
                    && column < region.rect.x.saturating_add(region.rect.width)
            })
            .map(|region| region.column)
    }

    pub fn set_status(&mut self, level: StatusLevel, message: String) {
        self.status = Some(StatusMessage::new(level, message, self.status_ttl));
    }

    pub fn cycle_view_mode(&mut self) {
        self.view_mode = self.view_mode.cycle();
    }

    fn clear_expired_status(&mut self) {
        if let Some(status) = self.status.as_ref()
            && status.is_expired()
        {
            self.status = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use crate::data::{MetricKind, Payload, ProcessRecord, SortDir};
    use crate::error::WebtopError;
    use crate::fetch::FetchOutcome;

    fn test_app(sort: SortState, resort_source: ResortSource) -> App {
        App::new(&Config {
            server_url: "http://127.0.0.1:3000".to_string(),
            tick_rate: Duration::from_millis(1000),
            request_timeout: Duration::from_millis(5000),
            status_ttl: Duration::from_secs(3),
            sort,
            resort_source,
            log_level: "info".to_string(),
            log_file: PathBuf::from("/tmp/webtop.log"),
        })
    }

    fn processes(tick: u64, records: Vec<ProcessRecord>) -> FetchOutcome {
        FetchOutcome {
            kind: MetricKind::Processes,
            tick,
            result: Ok(Payload::Processes(Some(records))),
        }
    }

    fn ok(kind: MetricKind, tick: u64, body: &str) -> FetchOutcome {
        FetchOutcome {
            kind,
            tick,
            result: Payload::decode(kind, body.as_bytes()),
        }
    }

    fn failed(kind: MetricKind, tick: u64) -> FetchOutcome {
        FetchOutcome {
            kind,
            tick,
            result: Err(WebtopError::http_status(kind.path(), 500)),
        }
    }

    fn pid_order(app: &App) -> Vec<Option<u32>> {
        app.table.rows().iter().map(|row| row.pid()).collect()
    }

    fn three_processes() -> Vec<ProcessRecord> {
        vec![
            ProcessRecord::new(1).with_cpu(0.10).with_memory(300),
            ProcessRecord::new(2).with_cpu(0.50).with_memory(100),
            ProcessRecord::new(3).with_cpu(0.10).with_memory(200),
        ]
    }

    #[test]
    fn gpu_failure_does_not_block_other_panels() {
        let mut app = test_app(SortState::unsorted(), ResortSource::Records);
        let tick = app.next_tick();

        app.apply_fetch(ok(MetricKind::Cpu, tick, r#"{"cpu_usage":[5.0]}"#));
        app.apply_fetch(failed(MetricKind::Gpu, tick));
        app.apply_fetch(ok(MetricKind::Memory, tick, r#"{"total_memory":10}"#));
        app.apply_fetch(ok(MetricKind::System, tick, r#"{"name":"Debian"}"#));
        app.apply_fetch(ok(
            MetricKind::Networks,
            tick,
            r#"{"networks":[{"interface_name":"lo","received":1,"transmitted":2}]}"#,
        ));
        app.apply_fetch(processes(tick, three_processes()));

        assert!(app.cpu.value().is_some());
        assert!(app.memory.value().is_some());
        assert!(app.system.value().is_some());
        assert_eq!(app.networks.value().map(Vec::len), Some(1));
        assert_eq!(app.table.len(), 3);
        assert!(app.gpus.value().is_none());
        assert!(app.panel_meta(MetricKind::Gpu).is_stale());
        assert!(!app.panel_meta(MetricKind::Processes).is_stale());
        assert!(app.status.is_some());
    }

    #[test]
    fn failure_keeps_last_good_render() {
        let mut app = test_app(SortState::unsorted(), ResortSource::Records);
        let first = app.next_tick();
        app.apply_fetch(processes(first, three_processes()));
        let second = app.next_tick();
        app.apply_fetch(failed(MetricKind::Processes, second));

        assert_eq!(pid_order(&app), vec![Some(1), Some(2), Some(3)]);
        assert!(app.panel_meta(MetricKind::Processes).is_stale());
    }

    #[test]
    fn unsorted_default_keeps_response_order() {
        let mut app = test_app(SortState::unsorted(), ResortSource::Records);
        let tick = app.next_tick();
        app.apply_fetch(processes(
            tick,
            vec![
                ProcessRecord::new(42),
                ProcessRecord::new(7),
                ProcessRecord::new(19),
            ],
        ));
        assert_eq!(pid_order(&app), vec![Some(42), Some(7), Some(19)]);
    }

    #[test]
    fn user_sort_survives_refresh() {
        let mut app = test_app(SortState::unsorted(), ResortSource::Records);
        let tick = app.next_tick();
        app.apply_fetch(processes(tick, three_processes()));

        app.activate_column(ColumnId::Memory);
        assert_eq!(pid_order(&app), vec![Some(2), Some(3), Some(1)]);

        let tick = app.next_tick();
        app.apply_fetch(processes(
            tick,
            vec![
                ProcessRecord::new(5).with_memory(50),
                ProcessRecord::new(6).with_memory(10),
            ],
        ));
        assert_eq!(pid_order(&app), vec![Some(6), Some(5)]);
        assert_eq!(app.sort, SortState::new(ColumnId::Memory, SortDir::Asc));
    }

    #[test]
    fn activation_resorts_without_fetch() {
        for source in [ResortSource::Records, ResortSource::Rendered] {
            let mut app = test_app(SortState::unsorted(), source);
            let tick = app.next_tick();
            app.apply_fetch(processes(tick, three_processes()));

            app.activate_column(ColumnId::CpuUsage);
            assert_eq!(pid_order(&app), vec![Some(1), Some(3), Some(2)]);

            app.activate_current_column();
            assert_eq!(pid_order(&app), vec![Some(2), Some(1), Some(3)]);
            assert_eq!(app.last_tick(), 1);
        }
    }

    #[test]
    fn older_tick_response_is_ignored() {
        let mut app = test_app(SortState::unsorted(), ResortSource::Records);
        let old = app.next_tick();
        let new = app.next_tick();

        app.apply_fetch(processes(new, vec![ProcessRecord::new(10)]));
        app.apply_fetch(processes(old, vec![ProcessRecord::new(99)]));
        app.apply_fetch(failed(MetricKind::Processes, old));

        assert_eq!(pid_order(&app), vec![Some(10)]);
        assert!(!app.panel_meta(MetricKind::Processes).is_stale());
    }

    #[test]
    fn missing_process_list_keeps_table() {
        let mut app = test_app(SortState::unsorted(), ResortSource::Records);
        let tick = app.next_tick();
        app.apply_fetch(processes(tick, three_processes()));
        let tick = app.next_tick();
        app.apply_fetch(ok(MetricKind::Processes, tick, "{}"));
        assert_eq!(app.table.len(), 3);
    }

    #[test]
    fn sort_change_posts_info_status() {
        let mut app = test_app(SortState::unsorted(), ResortSource::Records);
        app.activate_column(ColumnId::Status);
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.level, StatusLevel::Info);
        assert_eq!(status.text, "sorted by status asc");
    }

    #[test]
    fn column_navigation_from_unsorted() {
        let mut app = test_app(SortState::unsorted(), ResortSource::Records);
        app.activate_current_column();
        assert_eq!(app.sort, SortState::unsorted());

        app.activate_next_column();
        assert_eq!(app.sort.column(), Some(ColumnId::Pid));
        app.activate_prev_column();
        assert_eq!(app.sort, SortState::new(ColumnId::RunTime, SortDir::Asc));
    }

    #[test]
    fn header_click_maps_to_column() {
        let mut app = test_app(SortState::unsorted(), ResortSource::Records);
        app.process_header_regions = vec![
            HeaderRegion {
                column: ColumnId::Pid,
                rect: Rect::new(1, 5, 8, 1),
            },
            HeaderRegion {
                column: ColumnId::Name,
                rect: Rect::new(10, 5, 20, 1),
            },
        ];
        assert_eq!(app.column_for_header_click(3, 5), Some(ColumnId::Pid));
        assert_eq!(app.column_for_header_click(12, 5), Some(ColumnId::Name));
        assert_eq!(app.column_for_header_click(9, 5), None);
        assert_eq!(app.column_for_header_click(12, 6), None);
    }
}

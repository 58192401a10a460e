use std::time::Instant;

use tracing::{debug, warn};

use super::App;
use crate::app::status::StatusLevel;
use crate::data::{MetricKind, Payload};
use crate::fetch::FetchOutcome;

/// Freshness bookkeeping for one panel.
#[derive(Debug, Default)]
pub struct PanelMeta {
    applied_tick: Option<u64>,
    last_success: Option<Instant>,
    failure: Option<String>,
}

impl PanelMeta {
    /// Accepts an outcome unless one from a newer tick was already applied.
    fn admit(&mut self, tick: u64) -> bool {
        if self.applied_tick.is_some_and(|applied| tick < applied) {
            return false;
        }
        self.applied_tick = Some(tick);
        true
    }

    fn record_success(&mut self, now: Instant) {
        self.last_success = Some(now);
        self.failure = None;
    }

    fn record_failure(&mut self, reason: String) {
        self.failure = Some(reason);
    }

    pub fn applied_tick(&self) -> Option<u64> {
        self.applied_tick
    }

    pub fn last_error(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn is_stale(&self) -> bool {
        self.failure.is_some()
    }

    /// Title badge for a panel whose newest outcome was a failure.
    pub fn stale_label(&self, now: Instant) -> Option<String> {
        self.failure.as_ref()?;
        Some(match self.last_success {
            Some(at) => format!("stale {}s", now.saturating_duration_since(at).as_secs()),
            None => "no data".to_string(),
        })
    }
}

/// Last good value of a metric panel plus its freshness.
#[derive(Debug)]
pub struct Panel<T> {
    value: Option<T>,
    pub meta: PanelMeta,
}

impl<T> Default for Panel<T> {
    fn default() -> Self {
        Self {
            value: None,
            meta: PanelMeta::default(),
        }
    }
}

impl<T> Panel<T> {
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// `None` means the server omitted the data; the previous value stays.
    fn update(&mut self, value: Option<T>, now: Instant) {
        if let Some(value) = value {
            self.value = Some(value);
        }
        self.meta.record_success(now);
    }
}

impl App {
    /// Applies one endpoint outcome. Runs to completion inside a single loop
    /// turn, so a half-updated table is never drawn.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) {
        let FetchOutcome { kind, tick, result } = outcome;
        if !self.panel_meta_mut(kind).admit(tick) {
            debug!(endpoint = kind.path(), tick, "dropping response from an older tick");
            return;
        }

        match result {
            Ok(payload) => self.apply_payload(payload, Instant::now()),
            Err(err) => {
                warn!(endpoint = kind.path(), tick, error = %err, "metric fetch failed");
                self.panel_meta_mut(kind).record_failure(err.to_string());
                self.set_status(StatusLevel::Warn, err.to_string());
            }
        }
    }

    fn apply_payload(&mut self, payload: Payload, now: Instant) {
        match payload {
            Payload::Cpu(stats) => self.cpu.update(Some(stats), now),
            Payload::Memory(stats) => self.memory.update(Some(stats), now),
            Payload::System(info) => self.system.update(Some(info), now),
            Payload::Networks(networks) => self.networks.update(networks, now),
            Payload::Gpu(gpus) => self.gpus.update(gpus, now),
            Payload::Processes(records) => {
                self.process_meta.record_success(now);
                match records {
                    Some(records) => {
                        self.table.replace(records, &self.sort);
                        self.sync_selection();
                    }
                    None => debug!("process response carried no process list"),
                }
            }
        }
    }

    pub fn panel_meta(&self, kind: MetricKind) -> &PanelMeta {
        match kind {
            MetricKind::Cpu => &self.cpu.meta,
            MetricKind::Memory => &self.memory.meta,
            MetricKind::System => &self.system.meta,
            MetricKind::Networks => &self.networks.meta,
            MetricKind::Processes => &self.process_meta,
            MetricKind::Gpu => &self.gpus.meta,
        }
    }

    fn panel_meta_mut(&mut self, kind: MetricKind) -> &mut PanelMeta {
        match kind {
            MetricKind::Cpu => &mut self.cpu.meta,
            MetricKind::Memory => &mut self.memory.meta,
            MetricKind::System => &mut self.system.meta,
            MetricKind::Networks => &mut self.networks.meta,
            MetricKind::Processes => &mut self.process_meta,
            MetricKind::Gpu => &mut self.gpus.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn admit_rejects_older_ticks_only() {
        let mut meta = PanelMeta::default();
        assert!(meta.admit(3));
        assert!(meta.admit(3));
        assert!(!meta.admit(2));
        assert!(meta.admit(5));
        assert_eq!(meta.applied_tick(), Some(5));
    }

    #[test]
    fn stale_label_tracks_failures() {
        let start = Instant::now();
        let mut meta = PanelMeta::default();
        assert_eq!(meta.stale_label(start), None);

        meta.record_failure("HTTP 500".to_string());
        assert_eq!(meta.stale_label(start).as_deref(), Some("no data"));

        meta.record_success(start);
        assert!(!meta.is_stale());

        meta.record_failure("timed out".to_string());
        assert_eq!(meta.last_error(), Some("timed out"));
        assert_eq!(
            meta.stale_label(start + Duration::from_secs(4)).as_deref(),
            Some("stale 4s")
        );
    }

    #[test]
    fn panel_keeps_value_when_payload_missing() {
        let mut panel: Panel<Vec<u32>> = Panel::default();
        let now = Instant::now();
        panel.update(Some(vec![1, 2]), now);
        panel.update(None, now);
        assert_eq!(panel.value(), Some(&vec![1, 2]));
    }
}

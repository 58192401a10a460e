use super::sorting::{COLUMN_COUNT, ColumnId, SortState, sort_records, sort_rendered_rows};
use super::ProcessRecord;
use crate::utils::gib;

const PLACEHOLDER: &str = "-";

/// One process table row as it is drawn: display text per column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedRow {
    cells: [String; COLUMN_COUNT],
}

impl RenderedRow {
    pub fn from_cells(cells: [&str; COLUMN_COUNT]) -> Self {
        Self {
            cells: cells.map(str::to_string),
        }
    }

    pub fn cell(&self, column: ColumnId) -> &str {
        &self.cells[column.index()]
    }

    pub fn cells(&self) -> &[String; COLUMN_COUNT] {
        &self.cells
    }

    pub fn pid(&self) -> Option<u32> {
        self.cell(ColumnId::Pid).parse().ok()
    }
}

/// Formats one record. Each cell stands alone, so a hole in the record only
/// blanks its own cell.
pub fn render_row(record: &ProcessRecord) -> RenderedRow {
    let cells = ColumnId::ALL.map(|column| match column {
        ColumnId::Pid => record.pid.map(|pid| pid.to_string()),
        ColumnId::Name => record.name.clone().filter(|name| !name.is_empty()),
        ColumnId::CpuUsage => record
            .cpu_usage
            .filter(|cpu| cpu.is_finite())
            .map(|cpu| format!("{:.2}", cpu * 100.0)),
        ColumnId::Memory => record.memory.map(|memory| format!("{:.2}", gib(memory))),
        ColumnId::Status => record.status.clone().filter(|status| !status.is_empty()),
        ColumnId::RunTime => record.run_time.map(|secs| secs.to_string()),
    });
    RenderedRow {
        cells: cells.map(|cell| cell.unwrap_or_else(|| PLACEHOLDER.to_string())),
    }
}

pub fn render_rows(records: &[ProcessRecord]) -> Vec<RenderedRow> {
    records.iter().map(render_row).collect()
}

/// Where a header activation takes its input from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResortSource {
    /// Re-run the typed sort over the retained records and re-render.
    #[default]
    Records,
    /// Reorder the rendered rows by their cell text.
    Rendered,
}

impl ResortSource {
    pub fn label(self) -> &'static str {
        match self {
            ResortSource::Records => "records",
            ResortSource::Rendered => "rendered",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "records" | "typed" => Some(ResortSource::Records),
            "rendered" | "rows" => Some(ResortSource::Rendered),
            _ => None,
        }
    }
}

/// Process table contents: the last fetched records in arrival order plus
/// the rows currently on screen.
#[derive(Debug, Default)]
pub struct ProcessTable {
    records: Vec<ProcessRecord>,
    rows: Vec<RenderedRow>,
}

impl ProcessTable {
    /// Post-fetch path: sort the new records and swap in their rows.
    pub fn replace(&mut self, records: Vec<ProcessRecord>, sort: &SortState) {
        self.rows = sorted_rows(&records, sort);
        self.records = records;
    }

    /// Post-activation path; no fetch involved.
    pub fn resort(&mut self, sort: &SortState, source: ResortSource) {
        match source {
            ResortSource::Records => self.rows = sorted_rows(&self.records, sort),
            ResortSource::Rendered => sort_rendered_rows(&mut self.rows, sort),
        }
    }

    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    #[cfg(test)]
    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn position_of(&self, pid: u32) -> Option<usize> {
        self.rows.iter().position(|row| row.pid() == Some(pid))
    }
}

fn sorted_rows(records: &[ProcessRecord], sort: &SortState) -> Vec<RenderedRow> {
    if sort.column().is_none() {
        return render_rows(records);
    }
    let mut ordered = records.to_vec();
    sort_records(&mut ordered, sort);
    render_rows(&ordered)
}

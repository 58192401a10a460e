mod metrics;
mod process;
mod sorting;
mod table;

pub use metrics::{
    CpuStats, GpuStats, MemoryStats, MetricKind, NetworkInterface, Payload, SystemInfo,
};
pub use process::ProcessRecord;
pub use sorting::{
    COLUMN_COUNT, ColumnId, ColumnKind, ColumnSpec, PROCESS_COLUMNS, SortDir, SortState,
    locale_cmp, parse_numeric_cell, sort_records, sort_rendered_rows,
};
pub use table::{ProcessTable, RenderedRow, ResortSource, render_row, render_rows};

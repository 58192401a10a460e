use std::cmp::Ordering;

use super::{ProcessRecord, RenderedRow};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn toggle(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Some(SortDir::Asc),
            "desc" => Some(SortDir::Desc),
            _ => None,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        }
    }
}

/// Sortable process table columns, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnId {
    Pid,
    Name,
    CpuUsage,
    Memory,
    Status,
    RunTime,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
}

/// Static header configuration for one table column.
#[derive(Clone, Copy, Debug)]
pub struct ColumnSpec {
    pub id: ColumnId,
    pub label: &'static str,
    pub kind: ColumnKind,
    pub width: u16,
}

pub const COLUMN_COUNT: usize = 6;

pub const PROCESS_COLUMNS: [ColumnSpec; COLUMN_COUNT] = [
    ColumnSpec {
        id: ColumnId::Pid,
        label: "PID",
        kind: ColumnKind::Numeric,
        width: 8,
    },
    ColumnSpec {
        id: ColumnId::Name,
        label: "NAME",
        kind: ColumnKind::Text,
        width: 0,
    },
    ColumnSpec {
        id: ColumnId::CpuUsage,
        label: "CPU%",
        kind: ColumnKind::Numeric,
        width: 8,
    },
    ColumnSpec {
        id: ColumnId::Memory,
        label: "MEM GiB",
        kind: ColumnKind::Numeric,
        width: 9,
    },
    ColumnSpec {
        id: ColumnId::Status,
        label: "STATUS",
        kind: ColumnKind::Text,
        width: 9,
    },
    ColumnSpec {
        id: ColumnId::RunTime,
        label: "TIME s",
        kind: ColumnKind::Numeric,
        width: 9,
    },
];

impl ColumnId {
    pub const ALL: [ColumnId; COLUMN_COUNT] = [
        ColumnId::Pid,
        ColumnId::Name,
        ColumnId::CpuUsage,
        ColumnId::Memory,
        ColumnId::Status,
        ColumnId::RunTime,
    ];

    /// Identifier used in config files and on the command line.
    pub fn label(self) -> &'static str {
        match self {
            ColumnId::Pid => "pid",
            ColumnId::Name => "name",
            ColumnId::CpuUsage => "cpu_usage",
            ColumnId::Memory => "memory",
            ColumnId::Status => "status",
            ColumnId::RunTime => "run_time",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "pid" => Some(ColumnId::Pid),
            "name" => Some(ColumnId::Name),
            "cpu" | "cpu_usage" => Some(ColumnId::CpuUsage),
            "mem" | "memory" => Some(ColumnId::Memory),
            "stat" | "status" => Some(ColumnId::Status),
            "time" | "run_time" | "runtime" => Some(ColumnId::RunTime),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            ColumnId::Pid => 0,
            ColumnId::Name => 1,
            ColumnId::CpuUsage => 2,
            ColumnId::Memory => 3,
            ColumnId::Status => 4,
            ColumnId::RunTime => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn spec(self) -> &'static ColumnSpec {
        &PROCESS_COLUMNS[self.index()]
    }

    pub fn kind(self) -> ColumnKind {
        self.spec().kind
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % COLUMN_COUNT]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + COLUMN_COUNT - 1) % COLUMN_COUNT]
    }
}

/// Active column and direction of the process table.
///
/// Survives refresh cycles untouched; only [`SortState::activate`] changes it
/// after construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    column: Option<ColumnId>,
    dir: SortDir,
}

impl SortState {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn new(column: ColumnId, dir: SortDir) -> Self {
        Self {
            column: Some(column),
            dir,
        }
    }

    pub fn column(&self) -> Option<ColumnId> {
        self.column
    }

    /// Direction of the active column; `None` while unsorted.
    pub fn dir(&self) -> Option<SortDir> {
        self.column.map(|_| self.dir)
    }

    pub fn is_active(&self, column: ColumnId) -> bool {
        self.column == Some(column)
    }

    /// Header activation: same column flips direction, another column starts ascending.
    pub fn activate(&mut self, column: ColumnId) {
        *self = if self.column == Some(column) {
            Self::new(column, self.dir.toggle())
        } else {
            Self::new(column, SortDir::Asc)
        };
    }

    pub fn label(&self) -> String {
        match self.column {
            Some(column) => format!("{} {}", column.label(), self.dir.label()),
            None => "none".to_string(),
        }
    }
}

/// Orders freshly fetched records. With no active column the slice is left in arrival order.
pub fn sort_records(records: &mut [ProcessRecord], sort: &SortState) {
    let Some(column) = sort.column else {
        return;
    };
    let dir = sort.dir;

    records.sort_by(|a, b| {
        let ordering = match column {
            ColumnId::Pid => cmp_missing_last(a.pid.as_ref(), b.pid.as_ref(), Ord::cmp),
            ColumnId::Name => cmp_missing_last(a.name.as_deref(), b.name.as_deref(), locale_cmp),
            ColumnId::CpuUsage => cmp_missing_last(a.cpu_usage.as_ref(), b.cpu_usage.as_ref(), cmp_f64),
            ColumnId::Memory => cmp_missing_last(a.memory.as_ref(), b.memory.as_ref(), Ord::cmp),
            ColumnId::Status => {
                cmp_missing_last(a.status.as_deref(), b.status.as_deref(), locale_cmp)
            }
            ColumnId::RunTime => {
                cmp_missing_last(a.run_time.as_ref(), b.run_time.as_ref(), Ord::cmp)
            }
        };

        dir.apply(ordering)
            .then_with(|| cmp_missing_last(a.pid.as_ref(), b.pid.as_ref(), Ord::cmp))
    });
}

/// Reorders already rendered rows by the text of the active column's cells.
///
/// Numeric columns parse the cell (unparseable text counts as zero), text
/// columns compare with [`locale_cmp`].
pub fn sort_rendered_rows(rows: &mut [RenderedRow], sort: &SortState) {
    let Some(column) = sort.column else {
        return;
    };
    let dir = sort.dir;
    let numeric = column.kind() == ColumnKind::Numeric;

    rows.sort_by(|a, b| {
        let left = a.cell(column).trim();
        let right = b.cell(column).trim();
        let ordering = if numeric {
            cmp_f64(&parse_numeric_cell(left), &parse_numeric_cell(right))
        } else {
            locale_cmp(left, right)
        };

        dir.apply(ordering).then_with(|| {
            let pid_a = parse_numeric_cell(a.cell(ColumnId::Pid));
            let pid_b = parse_numeric_cell(b.cell(ColumnId::Pid));
            cmp_f64(&pid_a, &pid_b)
        })
    });
}

/// Case-insensitive ordering with lowercase ahead of uppercase on ties,
/// close to what a browser's default collation yields for ASCII names.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a
        .cmp(folded_b)
        .then_with(|| {
            let upper_a = a.chars().map(char::is_uppercase);
            let upper_b = b.chars().map(char::is_uppercase);
            upper_a.cmp(upper_b)
        })
        .then_with(|| a.cmp(b))
}

/// Parses the leading decimal number of a cell, the way `parseFloat` reads
/// `"12.5 MB"` as `12.5`. Anything without a numeric prefix is zero.
pub fn parse_numeric_cell(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0.0;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    match text[..end].parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

fn cmp_f64(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

fn cmp_missing_last<T: ?Sized>(
    a: Option<&T>,
    b: Option<&T>,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

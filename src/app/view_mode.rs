#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Every panel plus the process table
    #[default]
    Overview,
    /// Process table only
    Processes,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Overview => "Overview",
            ViewMode::Processes => "Processes",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            ViewMode::Overview => ViewMode::Processes,
            ViewMode::Processes => ViewMode::Overview,
        }
    }
}

use crossterm::event::{KeyEvent, MouseEvent};

use crate::fetch::FetchOutcome;

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// Terminal key press
    Key(KeyEvent),
    /// Mouse input
    Mouse(MouseEvent),
    /// Poll timer fired
    Tick,
    /// One endpoint finished (successfully or not)
    Fetched(FetchOutcome),
    /// Terminal resize
    Resize(u16, u16),
    /// Request to quit
    Quit,
}

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running
    Continue,
    /// Issue a new round of requests now
    Refresh,
    /// Exit the application
    Exit,
}

impl EventResult {
    pub fn should_exit(self) -> bool {
        matches!(self, EventResult::Exit)
    }

    pub fn should_refresh(self) -> bool {
        matches!(self, EventResult::Refresh)
    }
}

mod handler;
mod types;

pub use handler::{handle_event, handle_key};
pub use types::{AppEvent, EventResult};

mod config;
mod state;
mod status;
mod view_mode;

pub use config::{Args, Config};
pub use state::{App, HeaderRegion, Panel, PanelMeta};
pub use status::{StatusLevel, StatusMessage};
pub use view_mode::ViewMode;

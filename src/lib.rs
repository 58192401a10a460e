pub mod app;
pub mod data;
pub mod error;
pub mod events;
pub mod fetch;
pub mod ui;
pub mod utils;

pub use error::{Result, WebtopError};

mod process_table;

pub use process_table::render;

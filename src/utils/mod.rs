mod format;

pub use format::{
    GIB_DIVISOR, KB_DIVISOR, fit_text, format_gib, format_kb, gib, percent, render_bar,
    take_width, text_width,
};

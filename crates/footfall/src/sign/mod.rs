//! Sign backends for `footfall display`.

pub mod glyphs;
pub mod line;
pub mod panel;
pub mod tui;

pub use line::LineSign;

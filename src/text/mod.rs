//! Text module: turning node text into rows of styled cells.
//!
//! - [`decode_lines`]: compiled ANSI text to cells, one line per forced break
//! - [`TextLayout`]: wrapping, alignment, scroll windows and indicators

mod ansi;
mod layout;

pub use ansi::{decode_lines, LINE_BREAK};
pub use layout::{list_window, paragraphs, Contains, Indicators, Line, Overflow, Scroll, TextBlock, TextLayout};

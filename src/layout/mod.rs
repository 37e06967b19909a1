//! Layout module: resolving declared geometry into concrete cell bounds.
//!
//! Layout never fails. Out-of-range positions and sizes are clamped so a
//! render pass always gets a paintable (possibly zero-area) rectangle.

mod align;
mod rect;
mod sizing;

pub use align::{align, Align};
pub use rect::{Dim, Position, Rect, Size};
pub use sizing::Padding;

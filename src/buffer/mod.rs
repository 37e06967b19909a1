//! Buffer module: the cell grid and its diff-and-flush protocol.
//!
//! This module contains:
//! - [`Cell`]: one grapheme plus its style
//! - [`Buffer`]: a grid of cells representing the terminal screen
//! - [`View`]: a clipped window into a buffer that shares its cells
//! - [`diff`]: diffing engine for generating minimal ANSI sequences

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod diff;
mod view;

pub use buffer::Buffer;
pub use cell::{Cell, CellFlags};
pub use diff::DiffResult;
pub use view::View;

//! Cell: one terminal character cell.
//!
//! A cell holds a single grapheme and the [`StyleState`] it is drawn with.
//! Wide graphemes (CJK, most emoji) span two columns: the glyph cell is
//! followed by a continuation cell that the diff engine never writes.
//!
//! Styles are stored [`normalized`](StyleState::normalized), so two cells
//! that look the same on screen compare equal.

use crate::style::StyleState;
use bitflags::bitflags;
use compact_str::CompactString;
use std::fmt;
use unicode_width::UnicodeWidthStr;

bitflags! {
    /// Cell-level flags for special states.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// This cell is the second column of a wide grapheme.
        const WIDE_CONTINUATION = 0b0000_0001;
    }
}

impl fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single terminal cell.
#[derive(Clone, PartialEq, Eq)]
pub struct Cell {
    /// The grapheme. Empty only for continuation cells.
    symbol: CompactString,
    /// Style applied to the grapheme.
    style: StyleState,
    /// Cell flags.
    flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

impl Cell {
    /// A space with no style.
    #[inline]
    pub const fn blank() -> Self {
        Self {
            symbol: CompactString::const_new(" "),
            style: StyleState::new(),
            flags: CellFlags::empty(),
        }
    }

    /// A cell showing `symbol` in `style`.
    ///
    /// An empty symbol is drawn as a space.
    pub fn new(symbol: &str, style: &StyleState) -> Self {
        let mut cell = Self::blank();
        cell.set(symbol, style);
        cell
    }

    /// An unstyled cell holding one character.
    pub fn from_char(c: char) -> Self {
        let mut buf = [0u8; 4];
        Self::new(c.encode_utf8(&mut buf), &StyleState::new())
    }

    /// The second column of a wide grapheme.
    ///
    /// Carries the style of its glyph so background colors span both columns.
    pub fn wide_continuation(style: &StyleState) -> Self {
        Self {
            symbol: CompactString::const_new(""),
            style: style.normalized(),
            flags: CellFlags::WIDE_CONTINUATION,
        }
    }

    /// Replace symbol and style in place.
    pub fn set(&mut self, symbol: &str, style: &StyleState) -> &mut Self {
        self.symbol.clear();
        self.symbol.push_str(if symbol.is_empty() { " " } else { symbol });
        self.style = style.normalized();
        self.flags = CellFlags::empty();
        self
    }

    /// Replace only the style.
    pub fn set_style(&mut self, style: &StyleState) -> &mut Self {
        self.style = style.normalized();
        self
    }

    /// Builder form of [`set_style`](Self::set_style).
    #[must_use]
    pub fn with_style(mut self, style: &StyleState) -> Self {
        self.set_style(style);
        self
    }

    /// Reset to a blank cell.
    pub fn reset(&mut self) {
        *self = Self::blank();
    }

    /// The grapheme shown in this cell.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The cell's style.
    #[inline]
    pub const fn style(&self) -> &StyleState {
        &self.style
    }

    /// Get the flags.
    #[inline]
    pub const fn flags(&self) -> CellFlags {
        self.flags
    }

    /// Check if this is a wide-character continuation.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.flags.contains(CellFlags::WIDE_CONTINUATION)
    }

    /// Columns taken on screen: 0 for continuations, otherwise 1 or 2.
    pub fn display_width(&self) -> usize {
        if self.is_wide_continuation() {
            0
        } else {
            self.symbol.width().clamp(1, 2)
        }
    }

    /// True for unstyled spaces.
    pub fn is_blank(&self) -> bool {
        self.symbol == " " && self.style.is_empty() && self.flags.is_empty()
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("symbol", &self.symbol.as_str())
            .field("style", &self.style)
            .field("flags", &self.flags)
            .finish()
    }
}

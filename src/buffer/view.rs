//! View: a clipped, offset window into a [`Buffer`].
//!
//! Views do not own cells. Every read and write is translated into the
//! parent buffer's coordinates, so nested panels paint one shared canvas.
//! Overlapping views see each other's writes; that is the point.

use super::buffer::{clamp, Buffer};
use super::cell::Cell;
use crate::layout::Rect;
use crate::style::StyleState;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A rectangular window into a buffer.
#[derive(Debug)]
pub struct View<'a> {
    buffer: &'a mut Buffer,
    /// Absolute area within the buffer, already clamped to it.
    area: Rect,
}

impl<'a> View<'a> {
    pub(super) fn new(buffer: &'a mut Buffer, area: Rect) -> Self {
        Self { buffer, area }
    }

    /// Absolute area covered in the underlying buffer.
    #[inline]
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// Width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.area.width
    }

    /// Height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.area.height
    }

    /// The buffer this view writes into.
    pub fn buffer(&self) -> &Buffer {
        &*self.buffer
    }

    /// Map view-local (x, y) to buffer coordinates.
    #[inline]
    fn translate(&self, x: u16, y: u16) -> Option<(u16, u16)> {
        (x < self.area.width && y < self.area.height).then(|| (self.area.x + x, self.area.y + y))
    }

    /// Read the cell at view-local (x, y).
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        let (bx, by) = self.translate(x, y)?;
        self.buffer.get(bx, by)
    }

    /// Write a cell at view-local (x, y).
    ///
    /// A wide grapheme in the view's last column would spill into the
    /// neighbor, so it is written as a space instead. Out-of-view writes
    /// are dropped and return `false`.
    pub fn set_cell(&mut self, x: u16, y: u16, mut cell: Cell) -> bool {
        let Some((bx, by)) = self.translate(x, y) else {
            return false;
        };
        if cell.display_width() == 2 && x + 1 >= self.area.width {
            let style = cell.style().clone();
            cell.set(" ", &style);
        }
        self.buffer.set(bx, by, cell)
    }

    /// Write `symbol` in `style` at view-local (x, y).
    pub fn set(&mut self, x: u16, y: u16, symbol: &str, style: &StyleState) -> bool {
        self.set_cell(x, y, Cell::new(symbol, style))
    }

    /// Write a string left to right from (x, y), one grapheme at a time,
    /// stopping at the view's right edge. Returns the columns used.
    pub fn set_str(&mut self, x: u16, y: u16, text: &str, style: &StyleState) -> u16 {
        let mut col = x;
        for grapheme in text.graphemes(true) {
            let width = grapheme.width();
            if width == 0 {
                continue;
            }
            if col >= self.area.width {
                break;
            }
            self.set(col, y, grapheme, style);
            if width > 1 {
                self.set_cell(col + 1, y, Cell::wide_continuation(style));
            }
            col = col.saturating_add(if width > 1 { 2 } else { 1 });
        }
        col.min(self.area.width).saturating_sub(x)
    }

    /// Fill the whole view with copies of `cell`.
    pub fn fill(&mut self, cell: &Cell) {
        for y in 0..self.area.height {
            for x in 0..self.area.width {
                self.set_cell(x, y, cell.clone());
            }
        }
    }

    /// A nested view at view-local `(x, y, w, h)`, clamped to this view.
    pub fn sub(&mut self, x: u16, y: u16, w: u16, h: u16) -> View<'_> {
        let local = clamp(
            Rect::from_size(self.area.width, self.area.height),
            Rect::new(x, y, w, h),
        );
        let area = Rect::new(
            self.area.x + local.x,
            self.area.y + local.y,
            local.width,
            local.height,
        );
        View::new(self.buffer, area)
    }

    /// A nested view over a view-local rectangle.
    pub fn sub_rect(&mut self, rect: Rect) -> View<'_> {
        self.sub(rect.x, rect.y, rect.width, rect.height)
    }
}

//! Buffer: A grid of cells representing the terminal screen.
//!
//! The buffer uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order. Alongside the live cells it keeps
//! a snapshot of what the last [`flush`](Buffer::flush) put on screen.

use super::cell::Cell;
use super::diff::{render_diff, DiffResult};
use super::view::View;
use crate::layout::Rect;
use crate::terminal::OutputBuffer;
use std::io::Write;

/// A grid of cells representing the terminal screen.
///
/// Access is in row-major order: `index = y * width + x`.
#[derive(Clone)]
pub struct Buffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// What the terminal showed after the last flush.
    flushed: Vec<Cell>,
    /// Terminal width in columns.
    width: u16,
    /// Terminal height in rows.
    height: u16,
    /// Next flush writes every cell.
    repaint: bool,
    /// Reused between flushes.
    output: OutputBuffer,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells start blank, and so does the snapshot: a fresh screen
    /// (such as a new alternate screen) needs no initial repaint.
    /// Zero-sized buffers are allowed and render nothing.
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            cells: vec![Cell::blank(); size],
            flushed: vec![Cell::blank(); size],
            width,
            height,
            repaint: false,
            output: OutputBuffer::new(),
        }
    }

    /// Create a buffer sized to the current terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size cannot be queried.
    pub fn for_terminal() -> std::io::Result<Self> {
        let (width, height) = crossterm::terminal::size()?;
        Ok(Self::new(width, height))
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The whole buffer as a rectangle at the origin.
    #[inline]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the buffer has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell at (x, y).
    ///
    /// Keeps wide graphemes consistent: overwriting either half of a wide
    /// grapheme blanks the other half, and a wide grapheme that does not
    /// fit before the right edge is replaced by a space.
    ///
    /// Returns `false` if coordinates are out of bounds.
    pub fn set(&mut self, x: u16, y: u16, mut cell: Cell) -> bool {
        let Some(idx) = self.index_of(x, y) else {
            return false;
        };

        if cell.display_width() == 2 && x + 1 >= self.width {
            let style = cell.style().clone();
            cell.set(" ", &style);
        }

        let old = &self.cells[idx];
        if old.is_wide_continuation() && !cell.is_wide_continuation() && x > 0 {
            self.cells[idx - 1].reset();
        }
        if self.cells[idx].display_width() == 2 && cell.display_width() != 2 {
            if let Some(next) = self.cells.get_mut(idx + 1) {
                if next.is_wide_continuation() && x + 1 < self.width {
                    next.reset();
                }
            }
        }

        self.cells[idx] = cell;
        true
    }

    /// Clear the entire buffer (fill with blank cells).
    pub fn clear(&mut self) {
        self.cells.fill(Cell::blank());
    }

    /// Make the next flush write every cell.
    pub fn invalidate(&mut self) {
        self.repaint = true;
    }

    /// Resize the buffer, preserving content where possible.
    ///
    /// New cells are blank. The snapshot no longer describes the screen,
    /// so the next flush repaints everything.
    pub fn resize(&mut self, new_width: u16, new_height: u16) {
        if new_width == self.width && new_height == self.height {
            return;
        }

        let new_size = usize::from(new_width) * usize::from(new_height);
        let mut new_cells = vec![Cell::blank(); new_size];

        let copy_width = usize::from(self.width.min(new_width));
        let copy_height = usize::from(self.height.min(new_height));

        for y in 0..copy_height {
            let old_start = y * usize::from(self.width);
            let new_start = y * usize::from(new_width);
            new_cells[new_start..new_start + copy_width]
                .clone_from_slice(&self.cells[old_start..old_start + copy_width]);
        }

        // A wide grapheme cut at the new right edge loses its continuation.
        if new_width > 0 && new_width < self.width {
            let last = usize::from(new_width) - 1;
            for row in new_cells.chunks_mut(usize::from(new_width)) {
                if row[last].display_width() == 2 {
                    row[last].reset();
                }
            }
        }

        self.cells = new_cells;
        self.flushed = vec![Cell::blank(); new_size];
        self.width = new_width;
        self.height = new_height;
        self.repaint = true;
    }

    /// A view over the whole buffer.
    pub fn view(&mut self) -> View<'_> {
        let area = self.area();
        View::new(self, area)
    }

    /// A view over `(x, y, w, h)`, clamped to the buffer.
    ///
    /// The view writes straight into this buffer's cells.
    pub fn sub(&mut self, x: u16, y: u16, w: u16, h: u16) -> View<'_> {
        let area = clamp(self.area(), Rect::new(x, y, w, h));
        View::new(self, area)
    }

    /// Write the cells that changed since the last flush to `writer`.
    ///
    /// Emits zero bytes when nothing changed. Otherwise each run of changed
    /// cells on a row gets one cursor move, styles are diffed cell to cell,
    /// and the cursor is restored to where it was before the flush.
    ///
    /// # Errors
    ///
    /// Propagates write failures. The snapshot is left untouched on error,
    /// so the next flush retries the same changes.
    pub fn flush<W: Write>(&mut self, writer: &mut W) -> std::io::Result<DiffResult> {
        self.output.clear();
        let previous = if self.repaint {
            None
        } else {
            Some(self.flushed.as_slice())
        };
        let result = render_diff(previous, &self.cells, self.width, &mut self.output);

        if !self.output.is_empty() {
            self.output.flush_to(writer)?;
        }
        self.flushed.clone_from(&self.cells);
        self.repaint = false;

        tracing::trace!(
            cells = result.cells_changed,
            runs = result.runs,
            bytes = result.bytes_written,
            "flushed buffer"
        );
        Ok(result)
    }

    /// The plain text of each row, wide continuations omitted.
    pub fn to_lines(&self) -> Vec<String> {
        if self.width == 0 {
            return vec![String::new(); usize::from(self.height)];
        }
        self.cells
            .chunks(usize::from(self.width))
            .map(|row| {
                row.iter()
                    .filter(|cell| !cell.is_wide_continuation())
                    .map(Cell::symbol)
                    .collect()
            })
            .collect()
    }
}

/// Intersect `area` with `bounds`, collapsing to zero size at the edge.
pub(super) fn clamp(bounds: Rect, area: Rect) -> Rect {
    let x = area.x.clamp(bounds.left(), bounds.right());
    let y = area.y.clamp(bounds.top(), bounds.bottom());
    let right = area.right().min(bounds.right()).max(x);
    let bottom = area.bottom().min(bounds.bottom()).max(y);
    Rect::new(x, y, right - x, bottom - y)
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("repaint", &self.repaint)
            .finish_non_exhaustive()
    }
}

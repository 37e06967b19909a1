//! Diffing Engine: Generate minimal ANSI sequences from buffer changes.
//!
//! 1. Compare the live cells against the last flushed snapshot
//! 2. Group changed cells into runs per row, one cursor move per run
//! 3. Diff each cell's style against the previous cell written in this pass
//! 4. Bracket the whole update in a cursor save/restore
//!
//! All output is accumulated in a single buffer and flushed with one syscall.

use super::Cell;
use crate::style::StyleState;
use crate::terminal::OutputBuffer;

/// Result of a diff operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Number of cells written.
    pub cells_changed: usize,
    /// Number of runs emitted, one cursor move each.
    pub runs: usize,
    /// Bytes appended to the output.
    pub bytes_written: usize,
}

impl DiffResult {
    /// True when the flush emitted nothing.
    pub const fn is_empty(&self) -> bool {
        self.bytes_written == 0
    }
}

/// Render the difference between `previous` and `next` into `output`.
///
/// `previous` of `None` means the terminal contents are unknown and every
/// cell is written. Both slices are row-major with `width` columns.
///
/// Emits nothing at all when no cell changed. Otherwise the output starts
/// with a cursor save, ends with a return to the plain style and a cursor
/// restore.
pub fn render_diff(
    previous: Option<&[Cell]>,
    next: &[Cell],
    width: u16,
    output: &mut OutputBuffer,
) -> DiffResult {
    let mut result = DiffResult::default();
    let width = usize::from(width);
    if width == 0 {
        return result;
    }
    debug_assert!(previous.map_or(true, |prev| prev.len() == next.len()));

    let start = output.len();
    let changed = |index: usize| previous.map_or(true, |prev| prev[index] != next[index]);
    let mut last = StyleState::new();

    for (y, row) in next.chunks(width).enumerate() {
        let offset = y * width;
        // A glyph is dirty when it or its continuation changed.
        let dirty = |x: usize| {
            changed(offset + x)
                || (x + 1 < row.len() && row[x + 1].is_wide_continuation() && changed(offset + x + 1))
        };

        let mut x = 0;
        while x < row.len() {
            if row[x].is_wide_continuation() || !dirty(x) {
                x += 1;
                continue;
            }

            if result.runs == 0 {
                output.save_cursor();
            }
            output.cursor_move(to_u16(x), to_u16(y));
            result.runs += 1;

            while x < row.len() && (row[x].is_wide_continuation() || dirty(x)) {
                let cell = &row[x];
                if !cell.is_wide_continuation() {
                    output.write_style(cell.style(), &last);
                    output.write_str(cell.symbol());
                    last.clone_from(cell.style());
                    result.cells_changed += 1;
                }
                x += 1;
            }
        }
    }

    if result.runs > 0 {
        output.write_style(&StyleState::new(), &last);
        output.restore_cursor();
    }
    result.bytes_written = output.len() - start;
    result
}

#[allow(clippy::cast_possible_truncation)]
const fn to_u16(n: usize) -> u16 {
    if n > u16::MAX as usize {
        u16::MAX
    } else {
        n as u16
    }
}

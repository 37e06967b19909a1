//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.

use crate::style::StyleState;
use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// All output is accumulated here, then flushed in a single `write()` syscall
/// to prevent terminal flickering.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    data: Vec<u8>,
    scratch: String,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            scratch: String::new(),
        }
    }

    /// Create a buffer sized for a typical terminal (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Write the escapes that move a terminal from `previous` to `style`.
    pub fn write_style(&mut self, style: &StyleState, previous: &StyleState) {
        self.scratch.clear();
        style.write_diff(previous, &mut self.scratch);
        self.data.extend_from_slice(self.scratch.as_bytes());
    }

    /// Move the cursor to the 0-indexed cell (x, y).
    ///
    /// Uses the most compact representation:
    /// - `\x1b[H` for home
    /// - `\x1b[{row}H` for column 1
    /// - `\x1b[{row};{col}H` otherwise
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        let row = u32::from(y) + 1;
        let col = u32::from(x) + 1;

        if row == 1 && col == 1 {
            self.data.extend_from_slice(b"\x1b[H");
        } else if col == 1 {
            let _ = write!(self.data, "\x1b[{row}H");
        } else {
            let _ = write!(self.data, "\x1b[{row};{col}H");
        }
    }

    /// Save cursor position (DECSC).
    #[inline]
    pub fn save_cursor(&mut self) {
        self.data.extend_from_slice(b"\x1b7");
    }

    /// Restore the position saved by [`save_cursor`](Self::save_cursor) (DECRC).
    #[inline]
    pub fn restore_cursor(&mut self) {
        self.data.extend_from_slice(b"\x1b8");
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

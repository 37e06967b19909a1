//! Renderer Actor: dedicated thread for painting the tree.
//!
//! The renderer owns the root buffer and the output stream. The tree is
//! shared with the main loop behind a mutex that is held only while the
//! tree paints into the buffer; flushing happens after the lock is
//! released.

use super::messages::RenderCommand;
use crate::buffer::Buffer;
use crate::render::Tree;
use crossbeam_channel::Receiver;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Render statistics, returned when the thread stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames flushed.
    pub frames: u64,
    /// Cells changed across all frames.
    pub cells_changed: u64,
    /// Bytes written to the output.
    pub bytes_written: u64,
    /// Last frame time in microseconds.
    pub last_render_us: u64,
}

/// Handle to the render thread.
///
/// The thread stops on [`RenderCommand::Shutdown`] or when every command
/// sender is gone. Dropping the handle waits for that.
#[derive(Debug)]
pub struct RendererActor {
    handle: Option<JoinHandle<io::Result<RenderStats>>>,
}

struct Renderer<W> {
    buffer: Buffer,
    tree: Arc<Mutex<Tree>>,
    out: W,
    stats: RenderStats,
}

impl<W: Write> Renderer<W> {
    fn frame(&mut self) -> io::Result<()> {
        let start = Instant::now();
        {
            let mut tree = self.tree.lock().unwrap_or_else(PoisonError::into_inner);
            tree.render(&mut self.buffer);
        }
        let result = self.buffer.flush(&mut self.out)?;

        self.stats.frames += 1;
        self.stats.cells_changed += result.cells_changed as u64;
        self.stats.bytes_written += result.bytes_written as u64;
        self.stats.last_render_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        tracing::trace!(
            cells = result.cells_changed,
            runs = result.runs,
            bytes = result.bytes_written,
            "frame"
        );
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        tracing::debug!(width, height, "resize");
        self.buffer.resize(width, height);
        self.buffer.clear();
        self.buffer.invalidate();
        self.frame()
    }
}

impl RendererActor {
    /// Spawn the render thread.
    ///
    /// The thread paints `tree` into a `width` by `height` buffer and
    /// writes diffs to `out` until it receives
    /// [`RenderCommand::Shutdown`] or the command channel disconnects.
    pub fn spawn<W>(
        receiver: Receiver<RenderCommand>,
        tree: Arc<Mutex<Tree>>,
        out: W,
        width: u16,
        height: u16,
    ) -> Self
    where
        W: Write + Send + 'static,
    {
        let renderer = Renderer {
            buffer: Buffer::new(width, height),
            tree,
            out,
            stats: RenderStats::default(),
        };

        let handle = thread::Builder::new()
            .name("weft-render".to_string())
            .spawn(move || Self::run_loop(&receiver, renderer))
            .expect("Failed to spawn render thread");

        Self {
            handle: Some(handle),
        }
    }

    /// Wait for the thread to stop and return its statistics.
    ///
    /// Send [`RenderCommand::Shutdown`] (or drop every sender) first.
    pub fn join(mut self) -> io::Result<RenderStats> {
        self.handle
            .take()
            .map_or_else(|| Ok(RenderStats::default()), |handle| {
                handle.join().unwrap_or_else(|_| Err(io::Error::other("render thread panicked")))
            })
    }

    fn run_loop<W: Write>(
        receiver: &Receiver<RenderCommand>,
        mut renderer: Renderer<W>,
    ) -> io::Result<RenderStats> {
        for command in receiver {
            let result = match command {
                RenderCommand::Frame => renderer.frame(),
                RenderCommand::Resize { width, height } => renderer.resize(width, height),
                RenderCommand::Shutdown => break,
            };
            if let Err(e) = result {
                tracing::error!(error = %e, "render thread stopping");
                return Err(e);
            }
        }
        Ok(renderer.stats)
    }
}

impl Drop for RendererActor {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

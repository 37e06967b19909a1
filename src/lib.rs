//! # Weft
//!
//! A markup-to-ANSI compiler and a retained-mode terminal panel renderer.
//!
//! Weft has two halves that meet at the [`Buffer`]:
//!
//! - **Markup**: `[b red]error:[/] not found` compiles to the shortest
//!   ANSI string that produces it, tracking the emitted style so no
//!   redundant codes are written.
//! - **Rendering**: a [`Tree`] of bordered, scrollable [`Node`]s paints
//!   into one cell grid. Each flush writes only the cells that changed
//!   since the last one, wrapped in a cursor save/restore.
//!
//! ## Core Concepts
//!
//! - **Tri-state styles**: every attribute is on, off or unset, so styles
//!   merge and diff without losing explicit resets
//! - **Views**: nested panels are windows into a single shared buffer
//! - **Actor runtime**: input, ticker and render threads around an
//!   `Arc<Mutex<Tree>>`
//!
//! ## Example
//!
//! ```rust,ignore
//! use weft::{Buffer, Node, Tree};
//!
//! let mut tree = Tree::new().with_child(Node::new().with_id("log").with_title("log"));
//! if let Some(log) = tree.node_mut("log") {
//!     log.format("[b green]ready[/]")?;
//! }
//!
//! let mut buffer = Buffer::new(80, 24);
//! tree.render(&mut buffer);
//! buffer.flush(&mut std::io::stdout())?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod buffer;
pub mod error;
pub mod layout;
pub mod markup;
pub mod render;
pub mod style;
pub mod terminal;
pub mod text;

// Re-exports for convenience
pub use actor::{Engine, EngineConfig, Handler, InputEvent, KeyCode, KeyModifiers, Tick};
pub use buffer::{Buffer, Cell, CellFlags, DiffResult, View};
pub use error::{Error, Result};
pub use layout::{Align, Dim, Padding, Position, Rect, Size};
pub use markup::{compile, strip, MarkupCompiler};
pub use render::{Command, Direction, Focus, Node, Section, Settings, Tree, TreeNode};
pub use style::{Attributes, ColorSpec, Rgb, StyleState};
pub use text::{Contains, Overflow, TextLayout};

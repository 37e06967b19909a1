//! Render tree: nodes, sections and their borders.
//!
//! A [`Tree`] paints its [`TreeNode`]s depth first into one shared
//! [`Buffer`](crate::buffer::Buffer). Nodes resolve their declared
//! position and size against the view of their parent, so a whole layout
//! is a nesting of [`View`](crate::buffer::View)s over a single canvas.

pub mod border;
mod node;
mod section;
mod tree;

pub use border::{draw_border, draw_title, Corner, CornerStyle, Corners, EdgeStyle, Edges};
pub use node::{Focus, Node, Settings};
pub use section::Section;
pub use tree::{Command, Direction, Tree, TreeNode};

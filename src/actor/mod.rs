//! Actor runtime: message-passing threads around a shared tree.
//!
//! Three threads talk to the main loop over bounded crossbeam channels:
//! - **Input**: polls crossterm events and forwards keys and resizes
//! - **Ticker**: emits periodic ticks, dropping them when nobody keeps up
//! - **Renderer**: owns the root buffer, paints the tree and flushes diffs
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │              │
//! └──────────────┘                     │              │
//! ┌──────────────┐        Tick         │  Main Loop   │
//! │Ticker Thread │ ─────────────────▶  │   (Engine)   │
//! └──────────────┘                     │              │
//! ┌──────────────┐    RenderCommand    │              │
//! │Render Thread │ ◀─────────────────  │              │
//! └──────────────┘                     └──────────────┘
//!         │                                   │
//!         └──────── Arc<Mutex<Tree>> ─────────┘
//! ```
//!
//! Actor handles are move-only. Dropping one stops its thread.

mod engine;
mod input;
mod messages;
mod renderer;
mod ticker;

pub use engine::{key_command, Engine, EngineConfig, Handler};
pub use input::InputActor;
pub use messages::{InputEvent, KeyCode, KeyModifiers, RenderCommand};
pub use renderer::{RenderStats, RendererActor};
pub use ticker::{Tick, TickerActor};

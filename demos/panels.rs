//! Panels demo: a list, a streaming log and a status line on the engine.
//!
//! Tab/Shift-Tab move focus, Enter selects, Esc releases, hjkl or arrows
//! scroll, `c` clears the log, `q` quits. Logs go to `panels.log`; set
//! `RUST_LOG=weft=debug` for more.

use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use weft::layout::Padding;
use weft::render::{CornerStyle, Corners, EdgeStyle, Edges};
use weft::{
    Align, Command, Contains, Engine, EngineConfig, Handler, KeyCode, KeyModifiers, Node, Overflow,
    Position, Section, Settings, Size, Tick, Tree,
};

struct Demo {
    lines: u64,
}

impl Handler for Demo {
    fn on_key(&mut self, tree: &mut Tree, code: KeyCode, _modifiers: KeyModifiers) -> Option<Command> {
        if code != KeyCode::Char('c') {
            return None;
        }
        if let Some(log) = tree.node_mut("log") {
            log.clear();
        }
        Some(Command::Redraw)
    }

    fn on_tick(&mut self, tree: &mut Tree, tick: Tick) -> bool {
        if tick.frame % 30 != 0 {
            return false;
        }
        self.lines += 1;
        let selected = tree
            .node("menu")
            .and_then(|menu| menu.entry(menu.selected()))
            .unwrap_or_default();

        if let Some(log) = tree.node_mut("log") {
            let level = if self.lines % 7 == 0 { "[b red]WARN[/]" } else { "[green]INFO[/]" };
            let elapsed = tick.elapsed.as_secs_f32();
            let line = format!("[dim]{elapsed:>6.1}s[/] {level} tick {} from [i]{selected}[/]", tick.frame);
            if let Err(e) = log.format(&line) {
                tracing::warn!(error = %e, "bad log markup");
            }
            // Follow the tail; render clamps the offset.
            log.scroll_down();
        }
        if let Some(status) = tree.node_mut("status") {
            status.clear();
            let _ = status.format(&format!("[b]{}[/] lines   [d]Tab focus · Enter select · q quit[/]", self.lines));
        }
        true
    }
}

fn build_tree() -> Tree {
    let mut menu = Node::new()
        .with_id("menu")
        .with_title("Sources")
        .with_contains(Contains::List)
        .with_size(Size::new(0.3f32, 1.0f32))
        .with_settings(Settings::new().with_corners(Corners::uniform(CornerStyle::Rounded)));
    for source in ["alpha", "beta", "gamma", "delta\n  (two lines)", "epsilon"] {
        menu.write(source);
    }

    let log = Node::new()
        .with_id("log")
        .with_title("Log")
        .with_pos(Position::new(0.3f32, 0u16))
        .with_size(Size::new(0.7f32, 1.0f32))
        .with_settings(
            Settings::new()
                .with_edges(Edges::symmetric(EdgeStyle::Double, EdgeStyle::Single))
                .with_corners(Corners::uniform(CornerStyle::Double))
                .with_padding(Padding::symmetric(1, 0))
                .with_overflow(Overflow::Scroll, Overflow::Scroll),
        );

    let status = Node::new()
        .with_id("status")
        .with_pos(Position::new(0u16, weft::Dim::computed(|h| h.saturating_sub(1))))
        .with_size(Size::new(1.0f32, 1u16))
        .with_settings(
            Settings::new()
                .with_border(false)
                .with_text_align(Align::Center)
                .with_overflow(Overflow::Hidden, Overflow::Hidden),
        );

    let body = Section::new()
        .with_size(Size::new(1.0f32, weft::Dim::computed(|h| h.saturating_sub(1))))
        .with_child(menu)
        .with_child(log);

    Tree::new().with_child(body).with_child(status)
}

fn main() -> weft::Result<()> {
    let file = File::create("panels.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("weft=info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    let config = EngineConfig {
        tick_rate: Duration::from_millis(33),
        ..EngineConfig::default()
    };
    let mut engine = Engine::with_config(build_tree(), config)?;
    engine.run(&mut Demo { lines: 0 })
}

//! Engine: main coordinator that ties the actors together.
//!
//! The engine owns the terminal session. It spawns the input, ticker and
//! render threads, maps keys to tree [`Command`]s and asks the renderer
//! for a frame whenever the tree changed.

use super::input::InputActor;
use super::messages::{InputEvent, KeyCode, KeyModifiers, RenderCommand};
use super::renderer::RendererActor;
use super::ticker::{Tick, TickerActor};
use crate::error::{Error, Result};
use crate::render::{Command, Direction, Tree};
use crossbeam_channel::{bounded, select, Receiver, Sender, TrySendError};
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Configuration for the Engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Interval between ticks.
    pub tick_rate: Duration,
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
    /// Input queue capacity.
    pub input_capacity: usize,
    /// Render command queue capacity.
    pub render_capacity: usize,
    /// Tick queue capacity. Ticks beyond it are dropped.
    pub tick_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_secs(1) / 60,
            input_poll_timeout: Duration::from_millis(10),
            alternate_screen: true,
            input_capacity: 64,
            render_capacity: 16,
            tick_capacity: 2,
        }
    }
}

/// Application hooks called from [`Engine::run`].
///
/// Both hooks run with the tree locked.
pub trait Handler {
    /// A key was pressed. Return a command to override the default key
    /// map, or `None` to keep it.
    fn on_key(&mut self, tree: &mut Tree, code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
        let _ = (tree, code, modifiers);
        None
    }

    /// A tick arrived. Return `true` to request a frame.
    fn on_tick(&mut self, tree: &mut Tree, tick: Tick) -> bool {
        let _ = (tree, tick);
        false
    }
}

impl Handler for () {}

/// Default key map.
///
/// Tab and BackTab cycle focus, Enter selects, Backspace and Esc
/// deselect, `q` and Ctrl-C quit, `hjkl` and the arrows scroll.
pub const fn key_command(code: KeyCode, modifiers: KeyModifiers) -> Command {
    match code {
        KeyCode::Char('c') if modifiers.control => Command::Quit,
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Tab => Command::FocusNext,
        KeyCode::BackTab => Command::FocusPrev,
        KeyCode::Enter => Command::Select,
        KeyCode::Backspace | KeyCode::Esc => Command::Deselect,
        KeyCode::Char('k') | KeyCode::Up => Command::Scroll(Direction::Up),
        KeyCode::Char('j') | KeyCode::Down => Command::Scroll(Direction::Down),
        KeyCode::Char('h') | KeyCode::Left => Command::Scroll(Direction::Left),
        KeyCode::Char('l') | KeyCode::Right => Command::Scroll(Direction::Right),
        _ => Command::Noop,
    }
}

/// The runtime: terminal session plus the three actors.
///
/// Dropping the engine stops every thread and restores the terminal.
pub struct Engine {
    config: EngineConfig,
    tree: Arc<Mutex<Tree>>,
    input_rx: Receiver<InputEvent>,
    render_tx: Sender<RenderCommand>,
    input: Option<InputActor>,
    ticker: Option<TickerActor>,
    renderer: Option<RendererActor>,
    width: u16,
    height: u16,
}

impl Engine {
    /// Start an engine with default configuration.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedPlatform`] when stdout is not a terminal, or an
    /// I/O error from terminal setup.
    pub fn new(tree: Tree) -> Result<Self> {
        Self::with_config(tree, EngineConfig::default())
    }

    /// Start an engine with custom configuration.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedPlatform`] when stdout is not a terminal, or an
    /// I/O error from terminal setup.
    pub fn with_config(tree: Tree, config: EngineConfig) -> Result<Self> {
        if !io::stdout().is_tty() {
            return Err(Error::UnsupportedPlatform("stdout is not a terminal".to_string()));
        }
        let (width, height) = terminal::size()?;
        if let Err(e) = Self::enter(&config) {
            Self::restore(&config);
            return Err(e.into());
        }
        tracing::debug!(width, height, "terminal session started");

        let tree = Arc::new(Mutex::new(tree));
        let (input_tx, input_rx) = bounded::<InputEvent>(config.input_capacity);
        let (render_tx, render_rx) = bounded::<RenderCommand>(config.render_capacity);

        let input = InputActor::spawn(input_tx, config.input_poll_timeout);
        let ticker = TickerActor::spawn(config.tick_rate, config.tick_capacity);
        let renderer = RendererActor::spawn(render_rx, Arc::clone(&tree), io::stdout(), width, height);

        Ok(Self {
            config,
            tree,
            input_rx,
            render_tx,
            input: Some(input),
            ticker: Some(ticker),
            renderer: Some(renderer),
            width,
            height,
        })
    }

    fn enter(config: &EngineConfig) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        execute!(stdout, cursor::Hide)
    }

    fn restore(config: &EngineConfig) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if config.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
    }

    /// Terminal width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Terminal height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Configuration in use.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A handle to the shared tree, for updating it from other threads.
    /// Send [`RenderCommand::Frame`] through
    /// [`render_sender`](Self::render_sender) afterwards.
    pub fn tree(&self) -> Arc<Mutex<Tree>> {
        Arc::clone(&self.tree)
    }

    /// The render command queue, for requesting frames from other threads.
    pub fn render_sender(&self) -> Sender<RenderCommand> {
        self.render_tx.clone()
    }

    /// Ask the renderer for a frame. Does nothing if one is already queued
    /// behind a full channel.
    ///
    /// # Errors
    ///
    /// Returns the render thread's error if it has stopped.
    pub fn request_frame(&mut self) -> Result<()> {
        match self.render_tx.try_send(RenderCommand::Frame) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                tracing::trace!("frame request dropped, queue full");
                Ok(())
            }
            Err(TrySendError::Disconnected(_)) => Err(self.renderer_error()),
        }
    }

    fn renderer_error(&mut self) -> Error {
        match self.renderer.take().map(RendererActor::join) {
            Some(Err(e)) => e.into(),
            _ => io::Error::other("render thread stopped").into(),
        }
    }

    /// Run the event loop until a quit command or input shutdown.
    ///
    /// # Errors
    ///
    /// Returns the render thread's error if it stops early.
    pub fn run<H: Handler>(&mut self, handler: &mut H) -> Result<()> {
        let input = self.input_rx.clone();
        let ticks = match &self.ticker {
            Some(ticker) => ticker.receiver().clone(),
            None => crossbeam_channel::never(),
        };
        self.request_frame()?;

        loop {
            select! {
                recv(input) -> event => match event {
                    Ok(InputEvent::Key { code, modifiers }) => {
                        let mut tree = lock(&self.tree);
                        let command = handler
                            .on_key(&mut tree, code, modifiers)
                            .unwrap_or_else(|| key_command(code, modifiers));
                        if command == Command::Quit {
                            tracing::debug!("quit requested");
                            break;
                        }
                        let redraw = tree.apply(&command);
                        drop(tree);
                        tracing::debug!(?command, redraw, "key");
                        if redraw {
                            self.request_frame()?;
                        }
                    }
                    Ok(InputEvent::Resize { width, height }) => {
                        self.width = width;
                        self.height = height;
                        if self.render_tx.send(RenderCommand::Resize { width, height }).is_err() {
                            return Err(self.renderer_error());
                        }
                    }
                    Ok(InputEvent::Error(message)) => tracing::warn!(%message, "input error"),
                    Ok(InputEvent::Shutdown) | Err(_) => break,
                },
                recv(ticks) -> tick => {
                    let Ok(tick) = tick else { break };
                    let redraw = handler.on_tick(&mut lock(&self.tree), tick);
                    if redraw {
                        self.request_frame()?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn lock(tree: &Mutex<Tree>) -> MutexGuard<'_, Tree> {
    tree.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.input.take();
        self.ticker.take();
        let _ = self.render_tx.send(RenderCommand::Shutdown);
        if let Some(renderer) = self.renderer.take() {
            if let Err(e) = renderer.join() {
                tracing::error!(error = %e, "render thread failed");
            }
        }
        Self::restore(&self.config);
        tracing::debug!("terminal session restored");
    }
}

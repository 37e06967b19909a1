//! Input Actor: dedicated thread for polling terminal events.
//!
//! The thread polls crossterm with a short timeout so it notices a
//! shutdown request between polls.

use super::messages::{InputEvent, KeyCode, KeyModifiers};
use crossbeam_channel::{bounded, select, Receiver, Sender, TryRecvError, TrySendError};
use crossterm::event::{self, Event, KeyEventKind};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to the input thread. Dropping it stops the thread.
#[derive(Debug)]
pub struct InputActor {
    handle: Option<JoinHandle<()>>,
    /// Disconnects on drop, which the thread reads as shutdown.
    stop: Option<Sender<()>>,
}

impl InputActor {
    /// Spawn the input thread, sending events to `sender`.
    ///
    /// `poll_timeout` bounds how long shutdown can go unnoticed.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> Self {
        let (stop, stopped) = bounded::<()>(0);

        let handle = thread::Builder::new()
            .name("weft-input".to_string())
            .spawn(move || Self::run_loop(&sender, &stopped, poll_timeout))
            .expect("Failed to spawn input thread");

        Self {
            handle: Some(handle),
            stop: Some(stop),
        }
    }

    /// Stop the thread and wait for it.
    pub fn join(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(sender: &Sender<InputEvent>, stopped: &Receiver<()>, poll_timeout: Duration) {
        tracing::debug!("input thread started");
        loop {
            if !matches!(stopped.try_recv(), Err(TryRecvError::Empty)) {
                break;
            }

            let event = match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(event) => Self::convert_event(event),
                    Err(e) => Some(InputEvent::Error(e.to_string())),
                },
                Ok(false) => None,
                Err(e) => Some(InputEvent::Error(e.to_string())),
            };

            if let Some(event) = event {
                select! {
                    send(sender, event) -> sent => if sent.is_err() {
                        // Receiver dropped
                        break;
                    },
                    recv(stopped) -> _ => break,
                }
            }
        }
        if let Err(TrySendError::Full(_)) = sender.try_send(InputEvent::Shutdown) {
            tracing::warn!("input queue full at shutdown");
        }
        tracing::debug!("input thread stopped");
    }

    /// Convert a crossterm event. Key releases, mouse and focus events
    /// yield `None`.
    fn convert_event(event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return None;
                }
                let code = Self::convert_key_code(key.code)?;
                let modifiers = Self::convert_modifiers(key.modifiers);
                Some(InputEvent::Key { code, modifiers })
            }
            Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
            _ => None,
        }
    }

    fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
        Some(match code {
            event::KeyCode::Char(c) => KeyCode::Char(c),
            event::KeyCode::F(n) => KeyCode::F(n),
            event::KeyCode::Backspace => KeyCode::Backspace,
            event::KeyCode::Enter => KeyCode::Enter,
            event::KeyCode::Left => KeyCode::Left,
            event::KeyCode::Right => KeyCode::Right,
            event::KeyCode::Up => KeyCode::Up,
            event::KeyCode::Down => KeyCode::Down,
            event::KeyCode::Home => KeyCode::Home,
            event::KeyCode::End => KeyCode::End,
            event::KeyCode::PageUp => KeyCode::PageUp,
            event::KeyCode::PageDown => KeyCode::PageDown,
            event::KeyCode::Tab => KeyCode::Tab,
            event::KeyCode::BackTab => KeyCode::BackTab,
            event::KeyCode::Delete => KeyCode::Delete,
            event::KeyCode::Esc => KeyCode::Esc,
            _ => return None,
        })
    }

    fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
        KeyModifiers {
            shift: mods.contains(event::KeyModifiers::SHIFT),
            control: mods.contains(event::KeyModifiers::CONTROL),
            alt: mods.contains(event::KeyModifiers::ALT),
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

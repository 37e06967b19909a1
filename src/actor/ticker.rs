//! Ticker Actor: dedicated thread for periodic timing events.
//!
//! Ticks drive animation and periodic refresh without blocking the main
//! loop. The queue is tiny and sends never block: a slow consumer loses
//! ticks instead of accumulating them.

use crossbeam_channel::{bounded, select, tick, Receiver, Sender, TrySendError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A tick event sent at regular intervals.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Tick number, counting every interval including dropped ones.
    pub frame: u64,
    /// Time elapsed since the ticker was started.
    pub elapsed: Duration,
}

/// Handle to the ticker thread. Dropping it stops the thread.
#[derive(Debug)]
pub struct TickerActor {
    handle: Option<JoinHandle<()>>,
    stop: Option<Sender<()>>,
    tick_rx: Receiver<Tick>,
}

impl TickerActor {
    /// Spawn a ticker firing every `interval` into a queue of `capacity`.
    pub fn spawn(interval: Duration, capacity: usize) -> Self {
        let (stop, stopped) = bounded::<()>(0);
        let (tick_tx, tick_rx) = bounded(capacity);

        let handle = thread::Builder::new()
            .name("weft-ticker".to_string())
            .spawn(move || Self::run_loop(&tick_tx, &stopped, interval))
            .expect("Failed to spawn ticker thread");

        Self {
            handle: Some(handle),
            stop: Some(stop),
            tick_rx,
        }
    }

    /// The tick queue, for use in `select!`.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
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

    fn run_loop(tick_tx: &Sender<Tick>, stopped: &Receiver<()>, interval: Duration) {
        let start = Instant::now();
        let ticks = tick(interval);
        let mut frame = 0u64;

        loop {
            select! {
                recv(stopped) -> _ => break,
                recv(ticks) -> at => {
                    let Ok(at) = at else { break };
                    let event = Tick { frame, elapsed: at.saturating_duration_since(start) };
                    frame += 1;
                    match tick_tx.try_send(event) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => tracing::trace!(frame, "tick dropped"),
                        Err(TrySendError::Disconnected(_)) => break,
                    }
                }
            }
        }
    }
}

impl Drop for TickerActor {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_basic() {
        let ticker = TickerActor::spawn(Duration::from_millis(10), 2);

        let tick = ticker.receiver().recv_timeout(Duration::from_millis(200));
        assert_eq!(tick.map(|t| t.frame).ok(), Some(0));

        let second = ticker.receiver().recv_timeout(Duration::from_millis(200));
        assert!(second.is_ok());

        ticker.join();
    }

    #[test]
    fn test_slow_consumer_drops_ticks() {
        let ticker = TickerActor::spawn(Duration::from_millis(5), 2);
        thread::sleep(Duration::from_millis(60));

        assert_eq!(ticker.receiver().len(), 2);
        let first = ticker.receiver().recv().map(|t| t.frame).ok();
        assert_eq!(first, Some(0));
        ticker.receiver().recv().ok();
        let later = ticker
            .receiver()
            .recv_timeout(Duration::from_millis(200))
            .map(|t| t.frame)
            .ok();
        assert!(later.is_some_and(|frame| frame > 2));
    }

    #[test]
    fn test_drop_stops_thread() {
        let ticker = TickerActor::spawn(Duration::from_millis(100), 2);
        let rx = ticker.receiver().clone();
        drop(ticker);
        assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
    }
}

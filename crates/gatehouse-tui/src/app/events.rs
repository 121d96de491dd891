//! Event plumbing for the TUI
//!
//! Keyboard, paste, the animation frame tick, the one-second cooldown tick
//! and the timer-driven flow signals all arrive through one channel, so the
//! app loop handles each event to completion before looking at the next.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use gatehouse_core::AnimTarget;

/// Application events
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Bracketed paste payload
    Paste(String),
    /// Terminal tick (for animations)
    Tick,
    /// One wall-clock second of the resend cooldown elapsed
    CooldownTick,
    /// The synthetic submit pause finished
    SubmitSettled,
    /// An animation driver reported completion
    HandoffComplete { target: AnimTarget, generation: u64 },
    /// Terminal was resized
    Resize,
}

/// Event handler that fans input and timer sources into one receiver
pub struct EventHandler {
    /// Sender for events
    sender: mpsc::UnboundedSender<Event>,
    /// Receiver for events
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler and spawn its input and tick sources
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        // Terminal input reader
        let tx = sender.clone();
        tokio::spawn(async move {
            let mut stream = EventStream::new();
            while let Some(Ok(event)) = stream.next().await {
                let mapped = match event {
                    CrosstermEvent::Key(key) => Some(Event::Key(key)),
                    CrosstermEvent::Paste(text) => Some(Event::Paste(text)),
                    CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                    _ => None,
                };
                if let Some(mapped) = mapped {
                    if tx.send(mapped).is_err() {
                        break;
                    }
                }
            }
        });

        // Animation tick generator
        let tx = sender.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                interval.tick().await;
                if tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { sender, receiver }
    }

    /// Get a clone of the sender for other tasks to send events
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }

    /// Receive the next event
    pub async fn recv(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}

/// The cooldown's one-second tick source.
///
/// Owned by the app rather than living at module level: spawning is
/// idempotent while a task is live, and the task is aborted when the
/// countdown reaches zero or the app is dropped, so there is never more
/// than one concurrent tick source per app instance.
#[derive(Default)]
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Create a ticker with no live task
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a tick task is currently live
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start ticking once per second; no-op while already running
    pub fn spawn(&mut self, sender: mpsc::UnboundedSender<Event>) {
        if self.is_running() {
            return;
        }
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first interval tick fires immediately; the countdown
            // wants a full second before the first decrement.
            interval.tick().await;
            loop {
                interval.tick().await;
                if sender.send(Event::CooldownTick).is_err() {
                    break;
                }
            }
        }));
    }

    /// Tear the tick source down
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ticker_spawn_is_idempotent() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut ticker = Ticker::new();
        assert!(!ticker.is_running());

        ticker.spawn(tx.clone());
        assert!(ticker.is_running());
        let first = ticker.handle.as_ref().unwrap().id();

        // A second spawn while live must not replace the task.
        ticker.spawn(tx);
        assert_eq!(ticker.handle.as_ref().unwrap().id(), first);

        ticker.stop();
        assert!(!ticker.is_running());
    }

    #[tokio::test]
    async fn ticker_stop_without_spawn_is_harmless() {
        let mut ticker = Ticker::new();
        ticker.stop();
        assert!(!ticker.is_running());
    }
}

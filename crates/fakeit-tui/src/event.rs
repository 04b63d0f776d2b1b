//! Terminal event pump.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events delivered to the main loop.
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Periodic tick, used to expire transient status messages
    Tick,
    /// Terminal resize
    Resize(u16, u16),
}

/// Map a raw crossterm event to an application event.
///
/// Only key presses are forwarded; repeat and release events (reported by
/// some terminals, notably on Windows) would otherwise double-fire every
/// keybinding.
fn to_app_event(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

/// Polls crossterm on a background task and feeds the main loop through a
/// channel, interleaved with ticks.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if tx_clone.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                    _ = tokio::time::sleep(Duration::from_millis(50)) => {
                        // Zero-timeout poll keeps the worker from blocking.
                        if event::poll(Duration::from_millis(0)).unwrap_or(false) {
                            if let Ok(raw) = event::read() {
                                if let Some(e) = to_app_event(raw) {
                                    if tx_clone.send(e).is_err() {
                                        break;
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Receive the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

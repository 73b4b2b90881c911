//! Terminal input pump
//!
//! crossterm is polled on a plain thread and its events are forwarded over a
//! tokio channel, so the runner can `select!` them against coordinator
//! actions. A quiet poll interval becomes a `Tick`.

use std::time::Duration;

use crossterm::event::{self as term, KeyEvent, KeyEventKind};
use eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Events the runner reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

impl Event {
    /// Map a crossterm event, dropping what the UI ignores
    ///
    /// Only key presses count; Windows also reports releases and repeats.
    pub fn from_terminal(event: term::Event) -> Option<Self> {
        match event {
            term::Event::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            term::Event::Resize(width, height) => Some(Self::Resize(width, height)),
            _ => None,
        }
    }
}

/// Receiving end of the input pump
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Start polling the terminal every `tick_rate`
    pub fn new(tick_rate: Duration) -> Self {
        debug!(?tick_rate, "EventHandler::new: called");
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            loop {
                let event = match term::poll(tick_rate) {
                    Ok(true) => match term::read().ok().and_then(Event::from_terminal) {
                        Some(event) => event,
                        None => continue,
                    },
                    Ok(false) => Event::Tick,
                    Err(e) => {
                        debug!(error = %e, "EventHandler: poll failed, stopping");
                        break;
                    }
                };

                trace!(?event, "EventHandler: forwarding");
                if tx.send(event).is_err() {
                    debug!("EventHandler: runner gone, stopping");
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Wait for the next event
    pub async fn next(&mut self) -> Result<Event> {
        self.rx.recv().await.ok_or_else(|| eyre::eyre!("Terminal input stopped"))
    }
}

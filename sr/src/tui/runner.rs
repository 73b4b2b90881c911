//! TUI Runner - main loop that owns the terminal and the request coordinator
//!
//! The TuiRunner is responsible for:
//! - Dispatching key events to App
//! - Handing queued actions to the coordinator
//! - Applying the coordinator's state transitions as they arrive
//! - Rendering after every event

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::StudentApi;
use crate::coordinator::{CoordinatorHandle, RequestCoordinator};
use crate::error::ClientError;
use crate::state::Action;

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::{AppState, PendingAction};
use super::views;

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Event handler
    event_handler: EventHandler,
    /// Request coordinator front door
    handle: CoordinatorHandle,
    /// State transitions emitted by the coordinator
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl TuiRunner {
    /// Create a runner and spawn its coordinator
    pub fn new(terminal: Tui, api: Arc<dyn StudentApi>, backend_url: &str, tick_rate: Duration) -> Self {
        debug!(%backend_url, ?tick_rate, "TuiRunner::new: called");
        let (tx, action_rx) = mpsc::unbounded_channel();
        let handle = RequestCoordinator::spawn(api, tx);

        Self {
            app: App::new(AppState::with_backend_url(backend_url)),
            terminal,
            event_handler: EventHandler::new(tick_rate),
            handle,
            action_rx,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: called");
        // Initial load, same as mounting the page
        self.execute_action(PendingAction::Refresh).await;

        debug!("TuiRunner::run: entering main loop");
        loop {
            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;

            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Tick => {
                            self.app.state_mut().tick();
                        }
                        Event::Key(key_event) => {
                            if self.app.handle_key(key_event) {
                                debug!("TuiRunner::run: force quit");
                                break;
                            }
                        }
                        Event::Resize(width, height) => {
                            debug!(width, height, "TuiRunner::run: resize");
                        }
                    }
                }
                Some(action) = self.action_rx.recv() => {
                    self.apply(action);
                }
            }

            if let Some(action) = self.app.state_mut().pending_action.take() {
                self.execute_action(action).await;
            }

            if self.app.state().should_quit {
                debug!("TuiRunner::run: should_quit is true, breaking");
                break;
            }
        }

        self.handle.shutdown().await;
        debug!("TuiRunner::run: exiting");
        Ok(())
    }

    /// Apply one coordinator transition plus any that queued up behind it
    fn apply(&mut self, action: Action) {
        debug!(action = action.name(), "TuiRunner::apply: called");
        let state = self.app.state_mut();
        state.store.dispatch(action);
        state.store.drain(&mut self.action_rx);
        state.clamp_selection();
    }

    /// Hand a queued action to the coordinator
    ///
    /// Completions are not awaited; results arrive as actions on `action_rx`.
    async fn execute_action(&mut self, action: PendingAction) {
        debug!(?action, "TuiRunner::execute_action: called");
        let store = &mut self.app.state_mut().store;
        let result = match action {
            PendingAction::Submit => self.handle.upsert(store).await.map(drop),
            PendingAction::Remove(id) => self.handle.remove(store, id).await.map(drop),
            PendingAction::Refresh => self.handle.fetch_all().await.map(drop),
        };

        match result {
            Ok(()) => {}
            Err(e) if e.is_local() => {
                // Already reflected in the form state
                debug!(error = %e, "TuiRunner::execute_action: rejected locally");
            }
            Err(ClientError::ChannelClosed) => {
                warn!("Request coordinator stopped, quitting");
                self.app.state_mut().should_quit = true;
            }
            Err(e) => {
                info!(error = %e, "TuiRunner::execute_action: failed");
            }
        }
    }
}

//! Terminal User Interface for the student roster
//!
//! A two-pane screen: the add/edit form on the left, the student list on the
//! right. Keys go to the App, network work goes through the request
//! coordinator, and the coordinator's transitions are applied as they arrive.

mod app;
mod events;
mod runner;
pub mod state;
mod views;

pub use app::App;
pub use events::{Event, EventHandler};
pub use runner::TuiRunner;
pub use state::{AppState, Focus, InteractionMode, PendingAction};

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info, warn};

use crate::api::StudentApi;
use crate::config::Config;

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode + alternate screen for as long as the guard lives
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<(Self, Tui)> {
        enable_raw_mode()?;
        // From here on, dropping the guard undoes raw mode
        let guard = Self;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok((guard, terminal))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let restored = disable_raw_mode().and_then(|()| execute!(io::stdout(), LeaveAlternateScreen));
        if let Err(e) = restored {
            warn!(error = %e, "Failed to restore terminal");
        }
    }
}

/// Run the TUI against `api` until the user quits
pub async fn run(config: &Config, api: Arc<dyn StudentApi>) -> Result<()> {
    debug!(base_url = %config.backend.base_url, tick_ms = config.tui.tick_ms, "tui::run: called");
    let (_guard, terminal) = TerminalGuard::enter()?;

    info!("Starting TUI against {}", config.backend.base_url);
    let tick_rate = Duration::from_millis(config.tui.tick_ms);
    let mut runner = TuiRunner::new(terminal, api, &config.backend.base_url, tick_rate);
    runner.run().await
}

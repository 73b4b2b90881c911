//! TUI application - keyboard handling
//!
//! The App struct owns the AppState and handles all keyboard events. Form
//! edits go straight to the store; anything that needs the network is queued
//! as a `PendingAction` for the runner. No rendering and no I/O here.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace};

use super::state::{AppState, ConfirmDialog, Focus, InteractionMode, PendingAction};

/// TUI application
#[derive(Debug, Default)]
pub struct App {
    /// Application state
    state: AppState,
}

impl App {
    /// Create a new application instance
    pub fn new(state: AppState) -> Self {
        debug!("App::new: called");
        Self { state }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        trace!("App::state: called");
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        trace!("App::state_mut: called");
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit immediately.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        match &self.state.interaction_mode {
            InteractionMode::Normal => self.handle_normal_key(key),
            InteractionMode::Confirm(_) => self.handle_confirm_key(key),
            InteractionMode::Help => {
                debug!("App::handle_key: closing help");
                self.state.interaction_mode = InteractionMode::Normal;
                false
            }
        }
    }

    /// Keys that work regardless of focus, then per-focus handling
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                debug!("App::handle_normal_key: Ctrl+C force quit");
                return true;
            }
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                self.request_submit();
                return false;
            }
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => {
                debug!("App::handle_normal_key: Ctrl+L clear form");
                self.state.store.clear();
                return false;
            }
            (KeyCode::Tab, _) => {
                self.state.focus = self.state.focus.next();
                return false;
            }
            (KeyCode::BackTab, _) => {
                self.state.focus = self.state.focus.prev();
                return false;
            }
            _ => {}
        }

        match self.state.focus {
            Focus::Name | Focus::Address => self.handle_field_key(key),
            Focus::List => self.handle_list_key(key),
        }
        false
    }

    /// Typing into the focused form field
    fn handle_field_key(&mut self, key: KeyEvent) {
        let Some(field) = self.state.focus.field() else {
            return;
        };

        match key.code {
            KeyCode::Esc => {
                debug!("App::handle_field_key: Esc - focus list");
                self.state.focus = Focus::List;
            }
            KeyCode::Enter => {
                debug!("App::handle_field_key: Enter - submit");
                self.request_submit();
            }
            KeyCode::Backspace => {
                let mut value = self.state.store.state().draft.value(field).to_string();
                value.pop();
                self.state.store.set_field(field, value);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut value = self.state.store.state().draft.value(field).to_string();
                value.push(c);
                self.state.store.set_field(field, value);
            }
            _ => {
                trace!("App::handle_field_key: unhandled key");
            }
        }
    }

    /// Navigation and row actions in the list
    fn handle_list_key(&mut self, key: KeyEvent) {
        let count = self.state.visible_students().len();
        match key.code {
            KeyCode::Char('q') => {
                debug!("App::handle_list_key: quit requested");
                if self.state.store.state().submission.is_submitting() {
                    debug!("App::handle_list_key: submission in flight, confirming");
                    self.state.interaction_mode = InteractionMode::Confirm(ConfirmDialog::quit());
                } else {
                    self.state.should_quit = true;
                }
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.state.interaction_mode = InteractionMode::Help;
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.selection.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.state.selection.select_next(count),
            KeyCode::Home | KeyCode::Char('g') => self.state.selection.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.state.selection.select_last(count),
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(student) = self.state.selected_student().cloned() {
                    debug!(id = %student.id, "App::handle_list_key: begin edit");
                    self.state.store.begin_edit(&student);
                    self.state.focus = Focus::Name;
                }
            }
            KeyCode::Delete | KeyCode::Char('d') => {
                if let Some(student) = self.state.selected_student() {
                    debug!(id = %student.id, "App::handle_list_key: remove requested");
                    self.state.pending_action = Some(PendingAction::Remove(student.id));
                }
            }
            KeyCode::Char('r') => {
                debug!("App::handle_list_key: refresh requested");
                self.state.pending_action = Some(PendingAction::Refresh);
            }
            KeyCode::Char('c') => {
                self.state.store.clear();
            }
            KeyCode::Char('n') => {
                self.state.focus = Focus::Name;
            }
            _ => {
                trace!("App::handle_list_key: unhandled key");
            }
        }
    }

    /// Queue a submit unless one is already in flight (the disabled button)
    fn request_submit(&mut self) {
        if self.state.store.state().submission.is_submitting() {
            debug!("App::request_submit: submission in flight, ignoring");
            return;
        }
        debug!("App::request_submit: queuing submit");
        self.state.pending_action = Some(PendingAction::Submit);
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_confirm_key: called");
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Enter => {
                if let InteractionMode::Confirm(dialog) = &self.state.interaction_mode
                    && dialog.selected_button
                {
                    debug!("App::handle_confirm_key: quit confirmed");
                    self.state.should_quit = true;
                }
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                debug!("App::handle_confirm_key: quit confirmed with y");
                self.state.should_quit = true;
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                if let InteractionMode::Confirm(dialog) = &mut self.state.interaction_mode {
                    dialog.selected_button = !dialog.selected_button;
                }
            }
            _ => {}
        }
        false
    }
}

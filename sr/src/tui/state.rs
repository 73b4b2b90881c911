//! TUI application state
//!
//! View concerns only: focus, selection, modal overlays and the action the
//! runner should perform next. The student data and the form live in the
//! `Store`.

use tracing::debug;

use crate::domain::{Student, StudentId};
use crate::state::{Field, Store};

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Name,
    Address,
    List,
}

impl Focus {
    /// Get the next focus in the Tab cycle
    pub fn next(self) -> Self {
        debug!(?self, "Focus::next: called");
        match self {
            Self::Name => Self::Address,
            Self::Address => Self::List,
            Self::List => Self::Name,
        }
    }

    /// Get the previous focus in the Tab cycle
    pub fn prev(self) -> Self {
        debug!(?self, "Focus::prev: called");
        match self {
            Self::Name => Self::List,
            Self::Address => Self::Name,
            Self::List => Self::Address,
        }
    }

    /// Form field under focus, if any
    pub fn field(self) -> Option<Field> {
        match self {
            Self::Name => Some(Field::Name),
            Self::Address => Some(Field::Address),
            Self::List => None,
        }
    }
}

/// Interaction mode (modal)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    Normal,
    /// Confirmation dialog
    Confirm(ConfirmDialog),
    /// Help overlay
    Help,
}

/// Confirmation dialog for quitting with a submission in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub message: String,
    pub selected_button: bool, // false = No, true = Yes
}

impl ConfirmDialog {
    pub fn quit() -> Self {
        Self {
            message: "A submission is still in flight. Quit anyway?".to_string(),
            selected_button: false,
        }
    }
}

/// Work the runner hands to the request coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Submit,
    Remove(StudentId),
    Refresh,
}

/// List selection
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    pub selected_index: usize,
}

impl SelectionState {
    pub fn select_next(&mut self, max_items: usize) {
        if max_items > 0 && self.selected_index < max_items - 1 {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self, max_items: usize) {
        if max_items > 0 {
            self.selected_index = max_items - 1;
        }
    }

    /// Ensure selection is within bounds
    pub fn clamp(&mut self, max_items: usize) {
        if max_items == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= max_items {
            self.selected_index = max_items - 1;
        }
    }
}

/// Main TUI application state
#[derive(Debug)]
pub struct AppState {
    /// Form and list state
    pub store: Store,
    /// Keyboard focus
    pub focus: Focus,
    /// Current interaction mode
    pub interaction_mode: InteractionMode,
    /// Selected list row
    pub selection: SelectionState,
    /// Should the app quit
    pub should_quit: bool,
    /// Action queued for the runner
    pub pending_action: Option<PendingAction>,
    /// Backend shown in the header
    pub backend_url: String,
    /// Frame counter for the submission spinner
    pub tick_count: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        debug!("AppState::new: called");
        Self {
            store: Store::new(),
            focus: Focus::default(),
            interaction_mode: InteractionMode::Normal,
            selection: SelectionState::default(),
            should_quit: false,
            pending_action: None,
            backend_url: String::new(),
            tick_count: 0,
        }
    }

    pub fn with_backend_url(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            ..Self::new()
        }
    }

    /// Rows currently rendered in the list
    pub fn visible_students(&self) -> &[Student] {
        self.store.state().list.visible()
    }

    pub fn selected_student(&self) -> Option<&Student> {
        self.visible_students().get(self.selection.selected_index)
    }

    /// Keep the selection on a valid row after the snapshot changed
    pub fn clamp_selection(&mut self) {
        let count = self.visible_students().len();
        self.selection.clamp(count);
    }

    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Action;

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::Name.next(), Focus::Address);
        assert_eq!(Focus::Address.next(), Focus::List);
        assert_eq!(Focus::List.next(), Focus::Name);
        assert_eq!(Focus::Name.prev(), Focus::List);
        assert_eq!(Focus::List.field(), None);
        assert_eq!(Focus::Address.field(), Some(Field::Address));
    }

    #[test]
    fn test_selection_bounds() {
        let mut sel = SelectionState::default();
        sel.select_next(3);
        sel.select_next(3);
        sel.select_next(3);
        assert_eq!(sel.selected_index, 2);
        sel.select_prev();
        assert_eq!(sel.selected_index, 1);
        sel.clamp(1);
        assert_eq!(sel.selected_index, 0);
        sel.select_last(0);
        assert_eq!(sel.selected_index, 0);
    }

    #[test]
    fn test_selected_student_follows_snapshot() {
        let mut state = AppState::new();
        assert!(state.selected_student().is_none());

        state.store.dispatch(Action::FetchSuccess(vec![
            Student::new(StudentId::new(1), "A", "B"),
            Student::new(StudentId::new(2), "C", "D"),
        ]));
        state.selection.select_next(2);
        assert_eq!(state.selected_student().unwrap().id, StudentId::new(2));

        state
            .store
            .dispatch(Action::FetchSuccess(vec![Student::new(StudentId::new(1), "A", "B")]));
        state.clamp_selection();
        assert_eq!(state.selected_student().unwrap().id, StudentId::new(1));
    }
}

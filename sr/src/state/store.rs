//! Store - owner of the UI state and the form operations
//!
//! The store is the only place the state is replaced. Form operations are
//! synchronous; network completions arrive as actions from the request
//! coordinator and are applied with `dispatch` or `drain`.

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::domain::Student;
use crate::error::ClientError;

use super::action::Action;
use super::model::{Field, UiState};
use super::reducer::reduce;

/// Holder of the current `UiState`
#[derive(Debug, Default)]
pub struct Store {
    state: UiState,
}

impl Store {
    pub fn new() -> Self {
        debug!("Store::new: called");
        Self { state: UiState::new() }
    }

    pub fn state(&self) -> &UiState {
        trace!("Store::state: called");
        &self.state
    }

    /// Apply one action
    pub fn dispatch(&mut self, action: Action) {
        trace!(action = action.name(), "Store::dispatch: called");
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, action);
    }

    /// Apply every action already queued on the receiver
    ///
    /// Returns how many actions were applied.
    pub fn drain(&mut self, rx: &mut mpsc::UnboundedReceiver<Action>) -> usize {
        let mut applied = 0;
        while let Ok(action) = rx.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        if applied > 0 {
            debug!(applied, "Store::drain: applied queued actions");
        }
        applied
    }

    /// Update one form field; no validation
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.dispatch(Action::SetField {
            field,
            value: value.into(),
        });
    }

    /// Load a listed student into the form for editing
    pub fn begin_edit(&mut self, student: &Student) {
        debug!(id = %student.id, "Store::begin_edit: called");
        self.dispatch(Action::BeginEdit(student.clone()));
    }

    /// Reset the form and all messages
    pub fn clear(&mut self) {
        debug!("Store::clear: called");
        self.dispatch(Action::Clear);
    }

    /// Check both fields are filled in
    ///
    /// On failure the generic form error is set; field hints are derived from
    /// the draft by the view.
    pub fn validate(&mut self) -> Result<(), ClientError> {
        if self.state.draft.is_complete() {
            debug!("Store::validate: draft is complete");
            Ok(())
        } else {
            debug!(
                name_missing = self.state.draft.is_missing(Field::Name),
                address_missing = self.state.draft.is_missing(Field::Address),
                "Store::validate: draft incomplete"
            );
            self.dispatch(Action::ValidationFailed);
            Err(ClientError::ValidationFailed)
        }
    }
}

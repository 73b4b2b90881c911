//! State transition function

use tracing::{debug, trace};

use super::action::Action;
use super::model::{
    DELETE_FAILED, DELETED, FORM_REQUIRED, Field, FormDraft, LOAD_FAILED, ListStatus, OperationError, OperationKind,
    SubmissionState, UiState,
};

/// Apply one action, producing the next state
pub fn reduce(mut state: UiState, action: Action) -> UiState {
    debug!(action = action.name(), "reduce: called");
    match action {
        Action::SetField { field, value } => {
            trace!(?field, %value, "reduce: set field");
            match field {
                Field::Name => state.draft.name = value,
                Field::Address => state.draft.address = value,
            }
        }
        Action::BeginEdit(student) => {
            debug!(id = %student.id, "reduce: begin edit");
            state.draft = FormDraft {
                name: student.name,
                address: student.address,
                editing_id: Some(student.id),
            };
            state.form_error = None;
            state.success_message = None;
        }
        Action::Clear => {
            state.draft = FormDraft::default();
            state.form_error = None;
            state.success_message = None;
            state.error = None;
        }
        Action::ValidationFailed => {
            state.form_error = Some(FORM_REQUIRED.to_string());
            state.success_message = None;
        }
        Action::SubmitStart => {
            state.submission = SubmissionState::Submitting;
            state.form_error = None;
            state.success_message = None;
            state.error = None;
        }
        Action::SubmitSuccess { mode } => {
            debug!(%mode, "reduce: submit succeeded");
            state.success_message = Some(mode.success_message().to_string());
            state.error = None;
            state.draft = FormDraft::default();
            state.submission = SubmissionState::Idle;
        }
        Action::SubmitFailure { mode } => {
            debug!(%mode, "reduce: submit failed, keeping draft");
            state.error = Some(OperationError::new(
                OperationKind::from(mode),
                mode.failure_message(),
            ));
            state.success_message = None;
            state.submission = SubmissionState::Idle;
        }
        Action::FetchStart => {
            state.list.status = ListStatus::Loading;
        }
        Action::FetchSuccess(students) => {
            debug!(count = students.len(), "reduce: snapshot replaced");
            state.list.students = students;
            state.list.status = ListStatus::Loaded;
        }
        Action::FetchFailure => {
            state.list.students.clear();
            state.list.status = ListStatus::Failed(LOAD_FAILED.to_string());
        }
        Action::DeleteStart { id } => {
            trace!(%id, "reduce: delete started");
            state.success_message = None;
            state.error = None;
        }
        Action::DeleteSuccess { id } => {
            trace!(%id, "reduce: delete succeeded");
            state.success_message = Some(DELETED.to_string());
            state.error = None;
        }
        Action::DeleteFailure { id } => {
            trace!(%id, "reduce: delete failed");
            state.error = Some(OperationError::new(OperationKind::Delete, DELETE_FAILED));
            state.success_message = None;
        }
    }
    state
}

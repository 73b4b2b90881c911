//! Named state transitions

use crate::domain::{Student, StudentId};

use super::model::{Field, UpsertMode};

/// Every way the UI state can change
///
/// Form actions come from the user; the submit/fetch/delete completions come
/// from the request coordinator in the order its requests resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetField { field: Field, value: String },
    BeginEdit(Student),
    Clear,
    ValidationFailed,

    SubmitStart,
    SubmitSuccess { mode: UpsertMode },
    SubmitFailure { mode: UpsertMode },

    FetchStart,
    FetchSuccess(Vec<Student>),
    FetchFailure,

    DeleteStart { id: StudentId },
    DeleteSuccess { id: StudentId },
    DeleteFailure { id: StudentId },
}

impl Action {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetField { .. } => "SET_FIELD",
            Self::BeginEdit(_) => "BEGIN_EDIT",
            Self::Clear => "CLEAR",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::SubmitStart => "SUBMIT_START",
            Self::SubmitSuccess { .. } => "SUBMIT_SUCCESS",
            Self::SubmitFailure { .. } => "SUBMIT_FAILURE",
            Self::FetchStart => "FETCH_START",
            Self::FetchSuccess(_) => "FETCH_SUCCESS",
            Self::FetchFailure => "FETCH_FAILURE",
            Self::DeleteStart { .. } => "DELETE_START",
            Self::DeleteSuccess { .. } => "DELETE_SUCCESS",
            Self::DeleteFailure { .. } => "DELETE_FAILURE",
        }
    }
}

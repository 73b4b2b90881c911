//! UI state record
//!
//! Pure data structures. Nothing here performs I/O or renders; transitions
//! happen only through `reducer::reduce`.

use std::fmt;

use tracing::debug;

use crate::domain::{Student, StudentId, StudentPayload};

pub const FORM_REQUIRED: &str = "Both Name and Address are required";
pub const NAME_REQUIRED: &str = "Name is required";
pub const ADDRESS_REQUIRED: &str = "Address is required";
pub const ADDED: &str = "Student added successfully!";
pub const UPDATED: &str = "Student updated successfully!";
pub const DELETED: &str = "Student deleted successfully!";
pub const ADD_FAILED: &str = "Failed to add student. Please try again.";
pub const UPDATE_FAILED: &str = "Failed to update student. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete student. Please try again.";
pub const LOAD_FAILED: &str = "Failed to load students. Please try again.";

/// Editable form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Address,
}

impl Field {
    /// Hint shown under the field when it is missing
    pub fn required_hint(self) -> &'static str {
        match self {
            Self::Name => NAME_REQUIRED,
            Self::Address => ADDRESS_REQUIRED,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Enter Student Name",
            Self::Address => "Enter Student Address",
        }
    }
}

/// Create or update, decided by the presence of an editing id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertMode {
    Create,
    Update(StudentId),
}

impl UpsertMode {
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Create => ADDED,
            Self::Update(_) => UPDATED,
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Create => ADD_FAILED,
            Self::Update(_) => UPDATE_FAILED,
        }
    }
}

impl fmt::Display for UpsertMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "add"),
            Self::Update(_) => write!(f, "update"),
        }
    }
}

/// Transient form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub name: String,
    pub address: String,
    /// Present while editing an existing record
    pub editing_id: Option<StudentId>,
}

impl FormDraft {
    pub fn mode(&self) -> UpsertMode {
        match self.editing_id {
            Some(id) => UpsertMode::Update(id),
            None => UpsertMode::Create,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Address => &self.address,
        }
    }

    /// Check a field is blank after trimming
    pub fn is_missing(&self, field: Field) -> bool {
        self.value(field).trim().is_empty()
    }

    pub fn is_complete(&self) -> bool {
        !self.is_missing(Field::Name) && !self.is_missing(Field::Address)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.address.is_empty() && self.editing_id.is_none()
    }

    /// Request body, sent exactly as typed
    pub fn payload(&self) -> StudentPayload {
        StudentPayload::new(self.name.clone(), self.address.clone())
    }
}

/// Single-flight flag for upserts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

impl SubmissionState {
    pub fn is_submitting(self) -> bool {
        self == Self::Submitting
    }
}

/// Outcome of the latest fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListStatus {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

/// Wholesale-replaced copy of the backend's collection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListSnapshot {
    pub status: ListStatus,
    pub students: Vec<Student>,
}

impl ListSnapshot {
    pub fn get(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: StudentId) -> bool {
        self.get(id).is_some()
    }

    pub fn is_loaded(&self) -> bool {
        self.status == ListStatus::Loaded
    }

    /// Rows to render: only a loaded snapshot shows data
    pub fn visible(&self) -> &[Student] {
        if self.is_loaded() { &self.students } else { &[] }
    }
}

/// Operation a failure message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Create,
    Update,
    Delete,
}

impl From<UpsertMode> for OperationKind {
    fn from(mode: UpsertMode) -> Self {
        match mode {
            UpsertMode::Create => Self::Create,
            UpsertMode::Update(_) => Self::Update,
        }
    }
}

/// Failure message of a mutating operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationError {
    pub kind: OperationKind,
    pub message: String,
}

impl OperationError {
    pub fn new(kind: OperationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Form-level errors render under the form, the rest above the list
    pub fn is_form_level(&self) -> bool {
        matches!(self.kind, OperationKind::Create | OperationKind::Update)
    }
}

/// The whole client state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiState {
    pub draft: FormDraft,
    pub submission: SubmissionState,
    pub list: ListSnapshot,
    /// Validation failure
    pub form_error: Option<String>,
    /// Latest successful mutation; exclusive with `error`
    pub success_message: Option<String>,
    /// Latest failed mutation; exclusive with `success_message`
    pub error: Option<OperationError>,
}

impl UiState {
    pub fn new() -> Self {
        debug!("UiState::new: called");
        Self::default()
    }

    /// Per-field hint, derived from the validation error and field contents
    pub fn field_hint(&self, field: Field) -> Option<&'static str> {
        if self.form_error.is_some() && self.draft.is_missing(field) {
            Some(field.required_hint())
        } else {
            None
        }
    }

    pub fn form_title(&self) -> &'static str {
        if self.draft.is_editing() {
            "Edit Student Information"
        } else {
            "Student Information"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submission.is_submitting() {
            "Submitting..."
        } else if self.draft.is_editing() {
            "Update"
        } else {
            "Submit"
        }
    }

    /// Create/update failure, if the latest error belongs to the form
    pub fn form_level_error(&self) -> Option<&str> {
        self.error
            .as_ref()
            .filter(|e| e.is_form_level())
            .map(|e| e.message.as_str())
    }

    /// Delete failure, if the latest error belongs to the list
    pub fn list_level_error(&self) -> Option<&str> {
        self.error
            .as_ref()
            .filter(|e| !e.is_form_level())
            .map(|e| e.message.as_str())
    }

    /// Text for the latest failed outcome: validation, then the operation
    /// error, then a failed load
    pub fn failure_text(&self) -> Option<&str> {
        self.form_error
            .as_deref()
            .or_else(|| self.form_level_error())
            .or_else(|| self.list_level_error())
            .or(match &self.list.status {
                ListStatus::Failed(message) => Some(message.as_str()),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, address: &str, editing_id: Option<i64>) -> FormDraft {
        FormDraft {
            name: name.to_string(),
            address: address.to_string(),
            editing_id: editing_id.map(StudentId::new),
        }
    }

    #[test]
    fn test_mode_follows_editing_id() {
        assert_eq!(draft("a", "b", None).mode(), UpsertMode::Create);
        assert_eq!(draft("a", "b", Some(7)).mode(), UpsertMode::Update(StudentId::new(7)));
    }

    #[test]
    fn test_mode_messages() {
        assert_eq!(UpsertMode::Create.success_message(), "Student added successfully!");
        assert_eq!(
            UpsertMode::Update(StudentId::new(1)).success_message(),
            "Student updated successfully!"
        );
        assert_eq!(UpsertMode::Create.failure_message(), "Failed to add student. Please try again.");
        assert_eq!(
            UpsertMode::Update(StudentId::new(1)).failure_message(),
            "Failed to update student. Please try again."
        );
    }

    #[test]
    fn test_missing_fields_trim_whitespace() {
        let d = draft("  ", "1 Main St", None);
        assert!(d.is_missing(Field::Name));
        assert!(!d.is_missing(Field::Address));
        assert!(!d.is_complete());
        assert!(draft("Alice", "1 Main St", None).is_complete());
    }

    #[test]
    fn test_payload_is_sent_as_typed() {
        let d = draft(" Alice ", "1 Main St", Some(3));
        assert_eq!(d.payload(), StudentPayload::new(" Alice ", "1 Main St"));
    }

    #[test]
    fn test_field_hints_need_form_error() {
        let mut state = UiState::new();
        state.draft = draft("", "1 Main St", None);
        assert_eq!(state.field_hint(Field::Name), None);

        state.form_error = Some(FORM_REQUIRED.to_string());
        assert_eq!(state.field_hint(Field::Name), Some("Name is required"));
        assert_eq!(state.field_hint(Field::Address), None);
    }

    #[test]
    fn test_titles_and_labels() {
        let mut state = UiState::new();
        assert_eq!(state.form_title(), "Student Information");
        assert_eq!(state.submit_label(), "Submit");

        state.draft.editing_id = Some(StudentId::new(7));
        assert_eq!(state.form_title(), "Edit Student Information");
        assert_eq!(state.submit_label(), "Update");

        state.submission = SubmissionState::Submitting;
        assert_eq!(state.submit_label(), "Submitting...");
    }

    #[test]
    fn test_error_scopes() {
        let mut state = UiState::new();
        state.error = Some(OperationError::new(OperationKind::Create, ADD_FAILED));
        assert_eq!(state.form_level_error(), Some(ADD_FAILED));
        assert_eq!(state.list_level_error(), None);

        state.error = Some(OperationError::new(OperationKind::Delete, DELETE_FAILED));
        assert_eq!(state.form_level_error(), None);
        assert_eq!(state.list_level_error(), Some(DELETE_FAILED));
    }

    #[test]
    fn test_failure_text_per_outcome() {
        let mut state = UiState::new();
        assert_eq!(state.failure_text(), None);

        state.list.status = ListStatus::Failed(LOAD_FAILED.to_string());
        assert_eq!(state.failure_text(), Some(LOAD_FAILED));

        state.error = Some(OperationError::new(OperationKind::Delete, DELETE_FAILED));
        assert_eq!(state.failure_text(), Some(DELETE_FAILED));

        state.error = Some(OperationError::new(OperationKind::Update, UPDATE_FAILED));
        assert_eq!(state.failure_text(), Some(UPDATE_FAILED));

        state.form_error = Some(FORM_REQUIRED.to_string());
        assert_eq!(state.failure_text(), Some(FORM_REQUIRED));
    }

    #[test]
    fn test_snapshot_visible_only_when_loaded() {
        let mut list = ListSnapshot {
            status: ListStatus::Loading,
            students: vec![Student::new(StudentId::new(1), "A", "B")],
        };
        assert!(list.visible().is_empty());
        assert!(list.contains(StudentId::new(1)));

        list.status = ListStatus::Loaded;
        assert_eq!(list.visible().len(), 1);
    }
}

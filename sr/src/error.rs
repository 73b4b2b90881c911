//! Client-level error taxonomy
//!
//! Every variant is terminal for the operation that produced it. The state
//! machine turns them into messages; callers only see them to decide what to
//! print or log.

use thiserror::Error;

use crate::api::ApiError;
use crate::domain::StudentId;
use crate::state::UpsertMode;

/// Errors surfaced by the form and the request coordinator
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Both Name and Address are required")]
    ValidationFailed,

    #[error("A submission is already in flight")]
    AlreadySubmitting,

    #[error("Failed to load students: {0}")]
    FetchFailed(#[source] ApiError),

    #[error("Failed to {mode} student: {source}")]
    UpsertFailed { mode: UpsertMode, source: ApiError },

    #[error("Failed to delete student {id}: {source}")]
    DeleteFailed { id: StudentId, source: ApiError },

    #[error("No student with id {0} in the current list")]
    NotFound(StudentId),

    #[error("Request coordinator is not running")]
    ChannelClosed,
}

impl ClientError {
    /// Check if the error was raised before any request was sent
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::ValidationFailed | ClientError::AlreadySubmitting | ClientError::NotFound(_)
        )
    }
}

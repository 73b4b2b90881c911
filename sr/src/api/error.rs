//! REST client error types

use thiserror::Error;

/// Errors that can occur while talking to the student backend
///
/// Failure bodies are never parsed: a non-2xx answer only carries its status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend returned status {status}")]
    Status { status: u16 },

    #[error("Invalid response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Check if the backend answered at all
    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }

    /// Get the HTTP status if the backend answered with one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

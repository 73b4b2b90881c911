//! REST client for the student backend
//!
//! Provides the `StudentApi` abstraction and its `reqwest` implementation.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod http;

pub use client::StudentApi;
pub use error::ApiError;
pub use http::HttpStudentApi;

use crate::config::BackendConfig;

/// Create the backend client described by the configuration
pub fn create_client(config: &BackendConfig) -> Result<Arc<dyn StudentApi>, ApiError> {
    debug!(base_url = %config.base_url, "create_client: called");
    Ok(Arc::new(HttpStudentApi::from_config(config)?))
}

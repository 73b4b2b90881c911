//! HTTP implementation of the StudentApi trait
//!
//! Talks to the Spring-style `/student` REST endpoints with `reqwest`. No
//! retries and no timeouts: every failure is terminal for the call.

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, warn};

use super::{ApiError, StudentApi};
use crate::config::BackendConfig;
use crate::domain::{Student, StudentId, StudentPayload};

const LIST_PATH: &str = "/student/getAll";
const ADD_PATH: &str = "/student/add";
const UPDATE_PATH: &str = "/student/update";
const DELETE_PATH: &str = "/student/delete";

/// REST client for the student backend
#[derive(Debug, Clone)]
pub struct HttpStudentApi {
    base_url: String,
    http: Client,
}

impl HttpStudentApi {
    /// Create a client for the given base URL (e.g. `http://localhost:8080`)
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&base_url.into())?;
        debug!(%base_url, "HttpStudentApi::new: called");

        let http = Client::builder()
            .user_agent(concat!("studentroster/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self { base_url, http })
    }

    /// Create a client from backend configuration
    pub fn from_config(config: &BackendConfig) -> Result<Self, ApiError> {
        debug!(?config, "HttpStudentApi::from_config: called");
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn list_url(&self) -> String {
        format!("{}{}", self.base_url, LIST_PATH)
    }

    pub(crate) fn add_url(&self) -> String {
        format!("{}{}", self.base_url, ADD_PATH)
    }

    pub(crate) fn update_url(&self, id: StudentId) -> String {
        format!("{}{}/{}", self.base_url, UPDATE_PATH, id)
    }

    pub(crate) fn delete_url(&self, id: StudentId) -> String {
        format!("{}{}/{}", self.base_url, DELETE_PATH, id)
    }
}

/// Validate the scheme and strip trailing slashes
fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    debug!(%raw, "normalize_base_url: called");
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));
    match host {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        Some(_) => {
            debug!("normalize_base_url: missing host");
            Err(ApiError::InvalidUrl(raw.to_string()))
        }
        None => {
            debug!("normalize_base_url: unsupported scheme");
            Err(ApiError::InvalidUrl(raw.to_string()))
        }
    }
}

/// Map any non-2xx answer to `ApiError::Status`, ignoring the body
fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        debug!(%status, "check_status: success");
        Ok(response)
    } else {
        warn!(%status, url = %response.url(), "check_status: backend returned error status");
        Err(ApiError::Status {
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl StudentApi for HttpStudentApi {
    async fn list(&self) -> Result<Vec<Student>, ApiError> {
        let url = self.list_url();
        debug!(%url, "list: called");
        let response = check_status(self.http.get(&url).send().await?)?;
        let body = response.text().await?;
        let students: Vec<Student> = serde_json::from_str(&body)?;
        debug!(count = students.len(), "list: decoded students");
        Ok(students)
    }

    async fn create(&self, payload: &StudentPayload) -> Result<(), ApiError> {
        let url = self.add_url();
        debug!(%url, ?payload, "create: called");
        check_status(self.http.post(&url).json(payload).send().await?)?;
        Ok(())
    }

    async fn update(&self, id: StudentId, payload: &StudentPayload) -> Result<(), ApiError> {
        let url = self.update_url(id);
        debug!(%url, ?payload, "update: called");
        check_status(self.http.put(&url).json(payload).send().await?)?;
        Ok(())
    }

    async fn delete(&self, id: StudentId) -> Result<(), ApiError> {
        let url = self.delete_url(id);
        debug!(%url, "delete: called");
        check_status(self.http.delete(&url).send().await?)?;
        Ok(())
    }
}

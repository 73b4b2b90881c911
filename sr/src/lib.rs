//! studentroster - terminal client for a student records REST service
//!
//! Lists, adds, edits and deletes student records held by a backend that
//! exposes `/student/getAll`, `/student/add`, `/student/update/{id}` and
//! `/student/delete/{id}`.
//!
//! # Modules
//!
//! - [`domain`] - Student record and payload types
//! - [`api`] - `StudentApi` trait and its HTTP implementation
//! - [`state`] - Form/list state, actions and the reducer
//! - [`coordinator`] - Actor that serializes every backend request
//! - [`session`] - Sequential driver used by the subcommands
//! - [`tui`] - Interactive form + list screen
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod api;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod error;
pub mod session;
pub mod state;
pub mod tui;

pub use api::{ApiError, HttpStudentApi, StudentApi, create_client};
pub use config::Config;
pub use coordinator::{CoordinatorHandle, RequestCoordinator};
pub use domain::{Student, StudentId, StudentPayload};
pub use error::ClientError;
pub use session::Session;
pub use state::{Action, Store, UiState};

//! Client state machine
//!
//! An immutable `UiState` record, the `Action`s that transition it, the pure
//! `reduce` function, and the `Store` that owns the current state and exposes
//! the form operations.

mod action;
pub mod model;
mod reducer;
mod store;

pub use action::Action;
pub use model::{
    Field, FormDraft, ListSnapshot, ListStatus, OperationError, OperationKind, SubmissionState, UiState, UpsertMode,
};
pub use reducer::reduce;
pub use store::Store;
